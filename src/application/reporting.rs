use serde::{Deserialize, Serialize};

use crate::domain::{
    BalanceSummary, CategoryBreakdown, TimeSeriesPoint, Transaction, TransactionType,
    compute_balance_summary, compute_category_breakdown, compute_time_series,
};

/// Everything a dashboard view shows, derived from one snapshot of the
/// transaction collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub transaction_count: usize,
    pub summary: BalanceSummary,
    pub income_breakdown: Vec<CategoryBreakdown>,
    pub expense_breakdown: Vec<CategoryBreakdown>,
    pub time_series: Vec<TimeSeriesPoint>,
}

impl Dashboard {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        Self {
            transaction_count: transactions.len(),
            summary: compute_balance_summary(transactions),
            income_breakdown: compute_category_breakdown(transactions, TransactionType::Income),
            expense_breakdown: compute_category_breakdown(transactions, TransactionType::Expense),
            time_series: compute_time_series(transactions),
        }
    }

    /// Breakdown for the given transaction type.
    pub fn breakdown(&self, transaction_type: TransactionType) -> &[CategoryBreakdown] {
        match transaction_type {
            TransactionType::Income => &self.income_breakdown,
            TransactionType::Expense => &self.expense_breakdown,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}
