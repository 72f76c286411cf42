use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, Category, is_valid_amount};

pub type TransactionId = Uuid;

/// Midnight UTC of the current day, the default date for new transactions.
pub fn today() -> DateTime<FixedOffset> {
    Utc::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .fixed_offset()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (salary, gifts, ...)
    Income,
    /// Money going out (food, rent, ...)
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// Label used for the chart series of this type.
    pub fn series_label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expenses",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionType::from_str(s).ok_or_else(|| ParseTransactionTypeError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type '{0}', expected income or expense")]
pub struct ParseTransactionTypeError(pub String);

/// A single recorded money movement.
/// Transactions are replaced as a whole on update; the id never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Always positive; the direction comes from `transaction_type`
    pub amount: Amount,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction happened, with the offset it was recorded in
    pub date: DateTime<FixedOffset>,
}

impl Transaction {
    /// Create a new transaction with a fresh id.
    pub fn new(
        amount: Amount,
        transaction_type: TransactionType,
        category: Category,
        date: DateTime<FixedOffset>,
    ) -> Self {
        assert!(is_valid_amount(amount), "Transaction amount must be positive");
        Self {
            id: Uuid::new_v4(),
            amount,
            description: String::new(),
            category,
            transaction_type,
            date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// Calendar day of the transaction as it was recorded, ignoring the
    /// time of day. Matches the `YYYY-MM-DD` prefix of the stored timestamp.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}
