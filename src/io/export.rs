use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::domain::Transaction;

/// Snapshot of a set of transactions for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
}

/// Name offered for an export created on the given day, e.g.
/// `financial-transactions-2024-01-31.csv`.
pub fn default_export_filename(day: NaiveDate, extension: &str) -> String {
    format!("financial-transactions-{}.{}", day.format("%Y-%m-%d"), extension)
}

/// Exporter for writing a (usually filtered) list of transactions.
pub struct Exporter<'a> {
    transactions: &'a [Transaction],
}

impl<'a> Exporter<'a> {
    pub fn new(transactions: &'a [Transaction]) -> Self {
        Self { transactions }
    }

    /// Export transactions to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["Date", "Type", "Category", "Description", "Amount"])?;

        let mut count = 0;
        for transaction in self.transactions {
            csv_writer.write_record([
                transaction.day().format("%Y-%m-%d").to_string(),
                transaction.transaction_type.as_str().to_string(),
                transaction.category.as_str().to_string(),
                transaction.description.clone(),
                transaction.amount.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        tracing::debug!(count, "exported transactions as csv");
        Ok(count)
    }

    /// Export transactions as a JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<ExportSnapshot> {
        let snapshot = ExportSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            transactions: self.transactions.to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        tracing::debug!(count = snapshot.transactions.len(), "exported transactions as json");
        Ok(snapshot)
    }
}
