use anyhow::{Context, Result};
use chrono::DateTime;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{Category, Transaction, TransactionId, TransactionType};

use super::{MIGRATION_001_INITIAL, TransactionStore};

const SELECT_COLUMNS: &str = "SELECT id, amount, description, category, type, date FROM transactions";

/// SQLite-backed transaction store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        tracing::debug!(database_url, "connected to database");
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let store = Self::connect(database_url).await?;
        store.migrate().await?;
        Ok(store)
    }

    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
        let id_str: String = row.get("id");
        let category_str: String = row.get("category");
        let type_str: String = row.get("type");
        let date_str: String = row.get("date");

        Ok(Transaction {
            id: Uuid::parse_str(&id_str).context("Invalid transaction ID")?,
            amount: row.get("amount"),
            description: row.get("description"),
            category: Category::from_str_lossy(&category_str),
            transaction_type: TransactionType::from_str(&type_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction type: {}", type_str))?,
            date: DateTime::parse_from_rfc3339(&date_str).context("Invalid transaction date")?,
        })
    }
}

impl TransactionStore for SqliteStore {
    async fn insert(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, amount, description, category, type, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction.id.to_string())
        .bind(transaction.amount)
        .bind(&transaction.description)
        .bind(transaction.category.as_str())
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.date.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save transaction")?;

        tracing::debug!(id = %transaction.id, "inserted transaction");
        Ok(())
    }

    async fn replace(&self, transaction: &Transaction) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET amount = ?, description = ?, category = ?, type = ?, date = ?
            WHERE id = ?
            "#,
        )
        .bind(transaction.amount)
        .bind(&transaction.description)
        .bind(transaction.category.as_str())
        .bind(transaction.transaction_type.as_str())
        .bind(transaction.date.to_rfc3339())
        .bind(transaction.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update transaction")?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: TransactionId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete transaction")?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, id: TransactionId) -> Result<Option<Transaction>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch transaction")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_transaction(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY seq"))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list transactions")?;

        tracing::debug!(count = rows.len(), "loaded transactions");
        rows.iter().map(Self::row_to_transaction).collect()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn temp_store(dir: &TempDir) -> SqliteStore {
        let path = dir.path().join("store.db");
        SqliteStore::init(&format!("sqlite:{}?mode=rwc", path.display()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_migration_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir).await;
        store.migrate().await.unwrap();

        // Date filtering happens over `list`, so the table carries no
        // secondary indexes beyond the one backing `UNIQUE(id)`.
        let explicit_indexes: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND sql IS NOT NULL",
        )
        .fetch_one(&store.pool)
        .await
        .unwrap();
        assert_eq!(explicit_indexes, 0);
    }

    #[tokio::test]
    async fn test_unknown_category_decodes_as_other() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir).await;

        sqlx::query(
            "INSERT INTO transactions (id, amount, description, category, type, date) \
             VALUES (?, 12.0, 'Old row', 'groceries', 'expense', '2024-01-01T00:00:00+00:00')",
        )
        .bind(Uuid::new_v4().to_string())
        .execute(&store.pool)
        .await
        .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category, Category::Other);
    }
}
