use chrono::{DateTime, FixedOffset};

use crate::domain::{
    Amount, BalanceSummary, Category, CategoryBreakdown, ChartSeries, FilterCriteria,
    TimeSeriesPoint, Transaction, TransactionId, TransactionType, compute_balance_summary,
    compute_category_breakdown, compute_time_series, filter_transactions, is_valid_amount,
    project_category_chart, project_time_series_chart,
};
use crate::storage::{SqliteStore, TransactionStore};

use super::{AppError, Dashboard};

/// Application service providing high-level operations over the
/// transaction collection. This is the primary interface for any client
/// (CLI, API, TUI, etc.).
pub struct TransactionService<S> {
    store: S,
}

/// Everything needed to record a transaction except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub amount: Amount,
    pub description: String,
    pub category: Category,
    pub transaction_type: TransactionType,
    pub date: DateTime<FixedOffset>,
}

impl TransactionDraft {
    /// Start a draft from an existing transaction, e.g. to edit some fields.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount,
            description: transaction.description.clone(),
            category: transaction.category,
            transaction_type: transaction.transaction_type,
            date: transaction.date,
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if !is_valid_amount(self.amount) {
            return Err(AppError::InvalidAmount(format!(
                "{} is not greater than 0",
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::InvalidDescription(
                "Description must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn into_transaction(self, id: Option<TransactionId>) -> Transaction {
        let transaction = Transaction::new(
            self.amount,
            self.transaction_type,
            self.category,
            self.date,
        )
        .with_description(self.description);

        match id {
            Some(id) => transaction.with_id(id),
            None => transaction,
        }
    }
}

impl TransactionService<SqliteStore> {
    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let store = SqliteStore::init(&db_url).await?;
        Ok(Self::new(store))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let store = SqliteStore::connect(&db_url).await?;
        Ok(Self::new(store))
    }
}

impl<S: TransactionStore> TransactionService<S> {
    /// Create a new service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ========================
    // Commands
    // ========================

    /// Record a new transaction with a freshly generated id.
    pub async fn add_transaction(&self, draft: TransactionDraft) -> Result<Transaction, AppError> {
        draft.validate()?;

        let transaction = draft.into_transaction(None);
        self.store.insert(&transaction).await?;

        tracing::info!(
            id = %transaction.id,
            amount = transaction.amount,
            kind = %transaction.transaction_type,
            category = %transaction.category,
            "recorded transaction"
        );
        Ok(transaction)
    }

    /// Replace the transaction with the given id.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> Result<Transaction, AppError> {
        draft.validate()?;

        let transaction = draft.into_transaction(Some(id));
        if !self.store.replace(&transaction).await? {
            return Err(AppError::TransactionNotFound(id.to_string()));
        }

        tracing::info!(id = %id, "updated transaction");
        Ok(transaction)
    }

    /// Delete a transaction, returning what was removed.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<Transaction, AppError> {
        let transaction = self.get_transaction(id).await?;
        if !self.store.remove(id).await? {
            return Err(AppError::TransactionNotFound(id.to_string()));
        }

        tracing::info!(id = %id, "deleted transaction");
        Ok(transaction)
    }

    // ========================
    // Queries
    // ========================

    /// Get a transaction by id.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::TransactionNotFound(id.to_string()))
    }

    /// All transactions, in the order they were recorded.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.store.list().await?)
    }

    /// Transactions matching the criteria, in the order they were recorded.
    pub async fn list_transactions_filtered(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Transaction>, AppError> {
        let transactions = self.store.list().await?;
        let filtered = filter_transactions(&transactions, criteria);
        tracing::debug!(
            total = transactions.len(),
            matched = filtered.len(),
            "filtered transactions"
        );
        Ok(filtered)
    }

    pub async fn balance_summary(&self) -> Result<BalanceSummary, AppError> {
        Ok(compute_balance_summary(&self.store.list().await?))
    }

    pub async fn category_breakdown(
        &self,
        transaction_type: TransactionType,
    ) -> Result<Vec<CategoryBreakdown>, AppError> {
        Ok(compute_category_breakdown(
            &self.store.list().await?,
            transaction_type,
        ))
    }

    pub async fn time_series(&self) -> Result<Vec<TimeSeriesPoint>, AppError> {
        Ok(compute_time_series(&self.store.list().await?))
    }

    /// Summary, both breakdowns and the time series from one snapshot.
    pub async fn dashboard(&self) -> Result<Dashboard, AppError> {
        Ok(Dashboard::from_transactions(&self.store.list().await?))
    }

    /// Pie-chart data for the categories of one transaction type.
    pub async fn category_chart(
        &self,
        transaction_type: TransactionType,
    ) -> Result<ChartSeries, AppError> {
        let breakdown = self.category_breakdown(transaction_type).await?;
        Ok(project_category_chart(
            &breakdown,
            transaction_type.series_label(),
        ))
    }

    /// Line-chart data for daily income, expenses and balance.
    pub async fn time_series_chart(&self) -> Result<ChartSeries, AppError> {
        let points = self.time_series().await?;
        Ok(project_time_series_chart(&points))
    }
}
