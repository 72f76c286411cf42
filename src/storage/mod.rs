mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use anyhow::Result;

use crate::domain::{Transaction, TransactionId};

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Data-access interface for the transaction collection.
///
/// Implementations keep transactions in insertion order; replacing a
/// transaction keeps its position.
#[allow(async_fn_in_trait)]
pub trait TransactionStore {
    /// Append a new transaction.
    async fn insert(&self, transaction: &Transaction) -> Result<()>;

    /// Replace the transaction with the same id. Returns false if there is none.
    async fn replace(&self, transaction: &Transaction) -> Result<bool>;

    /// Remove a transaction by id. Returns false if there is none.
    async fn remove(&self, id: TransactionId) -> Result<bool>;

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>>;

    /// All transactions, in insertion order.
    async fn list(&self) -> Result<Vec<Transaction>>;
}
