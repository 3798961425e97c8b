use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Credit,
    Debit,
    /// Any label other than credit/debit. Such records still count toward
    /// monthly activity but accumulate into neither sum.
    Other,
}

/// A single transaction as supplied by the caller. The aggregator only ever
/// borrows these; it never stores or mutates them.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: Decimal,
}

impl TransactionType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "credit" => TransactionType::Credit,
            "debit" => TransactionType::Debit,
            _ => TransactionType::Other,
        }
    }
}

// Unknown labels are tolerated rather than rejected, so this cannot go
// through the usual derive.
impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(TransactionType::from_label(&label))
    }
}

impl Transaction {
    /// Full English month name of the transaction date, e.g. "July".
    /// Summaries key on this name alone; the year is discarded.
    pub fn month_name(&self) -> String {
        self.date.format("%B").to_string()
    }
}
