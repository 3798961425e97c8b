use account::CsvAccountLookup;
use anyhow::{Context, Result};
use chrono::Month;
use csv::Writer;
use std::{env, fs::File, io::stdout};
use summary::{MonthlyRow, SummaryAggregator};
use transaction::Transaction;

pub mod account;
pub mod summary;
pub mod transaction;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        anyhow::bail!(
            "Usage: {} transactions.csv accounts.csv account-id",
            args[0]
        );
    }

    run(&args[1], &args[2], &args[3])?;

    Ok(())
}

fn run(transactions_path: &str, accounts_path: &str, account_id: &str) -> Result<()> {
    let transactions = read_transactions(transactions_path)?;
    let lookup = CsvAccountLookup::from_path(accounts_path)?;

    let aggregator = SummaryAggregator::new(lookup);
    let (result, email) = aggregator.execute(account_id, &transactions)?;

    println!("Account {account_id} (notify {email})");
    println!("Total credit: {}", result.total_credit.round_dp(2));
    println!("Total debit: {}", result.total_debit.round_dp(2));

    // The aggregate itself is unordered; the report reads better in
    // calendar order.
    let mut summaries = result.monthly_summaries;
    summaries.sort_by_key(|summary| calendar_position(&summary.month));

    let mut writer = Writer::from_writer(stdout());

    for summary in &summaries {
        writer
            .serialize(MonthlyRow::from_summary(summary))
            .context("Failed to write output")?;
    }

    writer.flush().context("Failed to flush output")?;

    Ok(())
}

fn read_transactions(input_path: &str) -> Result<Vec<Transaction>> {
    let file =
        File::open(input_path).with_context(|| format!("Failed to open file: {input_path}"))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut transactions = Vec::new();

    for result in reader.deserialize() {
        match result {
            Ok(record) => transactions.push(record),
            Err(e) => {
                // A bad date or amount should not sink the whole report.
                eprintln!("Warning: Skipping invalid transaction record: {e}");
            }
        }
    }

    Ok(transactions)
}

fn calendar_position(month: &str) -> u32 {
    month
        .parse::<Month>()
        .map(|m| m.number_from_month())
        .unwrap_or(u32::MAX)
}
