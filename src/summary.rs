use crate::account::AccountLookup;
use crate::transaction::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Aggregated activity for one calendar month name. Keying is by name
/// alone, so the same month from different years merges into one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: String,
    pub num_transactions: u32,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub average_credit: Decimal,
    pub average_debit: Decimal,
}

/// Grand totals plus the per-month breakdown. The monthly list carries no
/// particular order.
#[derive(Debug, Clone)]
pub struct SummaryResult {
    pub total_credit: Decimal,
    pub total_debit: Decimal,
    pub monthly_summaries: Vec<MonthlySummary>,
}

#[derive(Debug, Error)]
pub enum SummaryError {
    /// The one failure mode of summary generation: the account repository
    /// could not resolve the id. No partial summary is returned.
    #[error("could not retrieve account {account_id}")]
    AccountLookup {
        account_id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Computes summaries over caller-supplied transactions and resolves the
/// notification email through the configured account lookup.
pub struct SummaryAggregator<L> {
    lookup: L,
}

/// Per-month running state. Credit/debit counts are tracked here alongside
/// the sums so averages come out of the same single pass.
#[derive(Debug, Default)]
struct MonthAccumulator {
    num_transactions: u32,
    total_credits: Decimal,
    total_debits: Decimal,
    credit_count: u32,
    debit_count: u32,
}

impl MonthAccumulator {
    fn into_summary(self, month: String) -> MonthlySummary {
        let average_credit = if self.credit_count > 0 {
            self.total_credits / Decimal::from(self.credit_count)
        } else {
            Decimal::ZERO
        };
        let average_debit = if self.debit_count > 0 {
            self.total_debits / Decimal::from(self.debit_count)
        } else {
            Decimal::ZERO
        };

        MonthlySummary {
            month,
            num_transactions: self.num_transactions,
            total_credits: self.total_credits,
            total_debits: self.total_debits,
            average_credit,
            average_debit,
        }
    }
}

impl<L: AccountLookup> SummaryAggregator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Builds the summary for `transactions` and returns it together with
    /// the notification email for `account_id`.
    ///
    /// Every transaction counts toward its month's activity; only credit
    /// and debit amounts accumulate into the sums. An empty input yields
    /// zero totals and no monthly entries.
    pub fn execute(
        &self,
        account_id: &str,
        transactions: &[Transaction],
    ) -> Result<(SummaryResult, String), SummaryError> {
        let mut total_credit = Decimal::ZERO;
        let mut total_debit = Decimal::ZERO;
        let mut monthly: HashMap<String, MonthAccumulator> = HashMap::new();

        for transaction in transactions {
            let entry = monthly.entry(transaction.month_name()).or_default();
            entry.num_transactions += 1;

            match transaction.tx_type {
                TransactionType::Credit => {
                    total_credit += transaction.amount;
                    entry.total_credits += transaction.amount;
                    entry.credit_count += 1;
                }
                TransactionType::Debit => {
                    total_debit += transaction.amount;
                    entry.total_debits += transaction.amount;
                    entry.debit_count += 1;
                }
                TransactionType::Other => {}
            }
        }

        let monthly_summaries = monthly
            .into_iter()
            .map(|(month, acc)| acc.into_summary(month))
            .collect();

        let account = self
            .lookup
            .get_account(account_id)
            .map_err(|source| SummaryError::AccountLookup {
                account_id: account_id.to_string(),
                source,
            })?;

        Ok((
            SummaryResult {
                total_credit,
                total_debit,
                monthly_summaries,
            },
            account.email,
        ))
    }
}

// Output format for CSV
#[derive(Debug, Serialize)]
pub struct MonthlyRow {
    pub month: String,
    pub transactions: u32,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub average_credit: Decimal,
    pub average_debit: Decimal,
}

impl MonthlyRow {
    pub fn from_summary(summary: &MonthlySummary) -> Self {
        Self {
            month: summary.month.clone(),
            transactions: summary.num_transactions,
            total_credits: summary.total_credits.round_dp(2),
            total_debits: summary.total_debits.round_dp(2),
            average_credit: summary.average_credit.round_dp(2),
            average_debit: summary.average_debit.round_dp(2),
        }
    }
}
