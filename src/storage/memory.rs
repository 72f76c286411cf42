use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Result;

use crate::domain::{Transaction, TransactionId};

use super::TransactionStore;

/// Transaction store that lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given transactions.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Transaction>>> {
        self.transactions
            .read()
            .map_err(|_| anyhow::anyhow!("Transaction store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Transaction>>> {
        self.transactions
            .write()
            .map_err(|_| anyhow::anyhow!("Transaction store lock poisoned"))
    }
}

impl TransactionStore for MemoryStore {
    async fn insert(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.write()?;
        if transactions.iter().any(|t| t.id == transaction.id) {
            anyhow::bail!("Transaction {} already exists", transaction.id);
        }
        transactions.push(transaction.clone());
        Ok(())
    }

    async fn replace(&self, transaction: &Transaction) -> Result<bool> {
        let mut transactions = self.write()?;
        match transactions.iter_mut().find(|t| t.id == transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: TransactionId) -> Result<bool> {
        let mut transactions = self.write()?;
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        Ok(transactions.len() < before)
    }

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        Ok(self.read()?.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.read()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::{Category, TransactionType};

    fn make_transaction(amount: f64) -> Transaction {
        Transaction::new(
            amount,
            TransactionType::Expense,
            Category::Food,
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_list_keep_order() {
        let store = MemoryStore::new();
        let first = make_transaction(1.0);
        let second = make_transaction(2.0);
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        let tx = make_transaction(1.0);
        store.insert(&tx).await.unwrap();
        assert!(store.insert(&tx).await.is_err());
    }

    #[tokio::test]
    async fn test_replace_keeps_position() {
        let first = make_transaction(1.0);
        let second = make_transaction(2.0);
        let store = MemoryStore::with_transactions(vec![first.clone(), second.clone()]);

        let mut updated = first.clone();
        updated.amount = 10.0;
        assert!(store.replace(&updated).await.unwrap());

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].amount, 10.0);
        assert_eq!(listed[1].id, second.id);

        assert!(!store.replace(&make_transaction(3.0)).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove() {
        let tx = make_transaction(1.0);
        let store = MemoryStore::with_transactions(vec![tx.clone()]);

        assert!(store.remove(tx.id).await.unwrap());
        assert!(!store.remove(tx.id).await.unwrap());
        assert!(store.get(tx.id).await.unwrap().is_none());
    }
}
