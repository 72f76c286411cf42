// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate};
use fintrack::application::{TransactionDraft, TransactionService};
use fintrack::domain::{Category, Transaction, TransactionType};
use fintrack::storage::SqliteStore;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(TransactionService<SqliteStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = TransactionService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into midnight UTC
pub fn parse_date(date_str: &str) -> DateTime<FixedOffset> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .fixed_offset()
}

pub fn draft(
    amount: f64,
    transaction_type: TransactionType,
    category: Category,
    date: &str,
    description: &str,
) -> TransactionDraft {
    TransactionDraft {
        amount,
        description: description.into(),
        category,
        transaction_type,
        date: parse_date(date),
    }
}

/// In-memory transaction value, for the pure functions.
pub fn tx(amount: f64, transaction_type: TransactionType, category: Category, date: &str) -> Transaction {
    Transaction::new(amount, transaction_type, category, parse_date(date))
}

/// Salary on day one, two food expenses over two days.
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        tx(100.0, TransactionType::Income, Category::Salary, "2024-01-01")
            .with_description("January salary"),
        tx(40.0, TransactionType::Expense, Category::Food, "2024-01-01")
            .with_description("Groceries"),
        tx(20.0, TransactionType::Expense, Category::Food, "2024-01-02")
            .with_description("Lunch out"),
    ]
}

/// Record the sample transactions through the service.
pub async fn seed_sample(service: &TransactionService<SqliteStore>) -> Result<Vec<Transaction>> {
    let mut recorded = Vec::new();
    for transaction in sample_transactions() {
        let created = service
            .add_transaction(TransactionDraft::from_transaction(&transaction))
            .await?;
        recorded.push(created);
    }
    Ok(recorded)
}
