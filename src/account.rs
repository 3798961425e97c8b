use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Contact details for one account.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub email: String,
}

/// Resolves an account id to its contact details. The summary flow treats
/// any error from here as fatal to the whole call.
pub trait AccountLookup {
    fn get_account(&self, account_id: &str) -> Result<Account>;
}

#[derive(Debug, Deserialize)]
struct AccountRecord {
    id: String,
    email: String,
}

/// Account lookup backed by an `id,email` CSV file loaded up front.
/// In a real world application this would sit on a database; a flat file
/// keeps the report tool self-contained.
pub struct CsvAccountLookup {
    accounts: HashMap<String, Account>,
}

impl CsvAccountLookup {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open accounts file: {}", path.display()))?;
        Self::from_reader(file)
    }

    /// Accounts are reference data, so a malformed row here is an error
    /// rather than something to skip.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut accounts = HashMap::new();
        for result in csv_reader.deserialize() {
            let record: AccountRecord = result.context("Invalid account record")?;
            accounts.insert(record.id, Account { email: record.email });
        }

        Ok(Self { accounts })
    }
}

impl AccountLookup for CsvAccountLookup {
    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .get(account_id)
            .cloned()
            .with_context(|| format!("No account with id {account_id}"))
    }
}
