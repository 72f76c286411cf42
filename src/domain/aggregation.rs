use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Amount, Category, Transaction, TransactionType};

/// Income, expense and their difference over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub income: Amount,
    pub expense: Amount,
    pub balance: Amount,
}

/// Total of one category and its share of the type's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub amount: Amount,
    pub percentage: f64,
}

/// Income and expense of a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub income: Amount,
    pub expense: Amount,
    /// That day's income minus that day's expense (not cumulative)
    pub balance: Amount,
}

/// Compute the balance summary for a list of transactions.
/// Balance = sum of income - sum of expenses
pub fn compute_balance_summary(transactions: &[Transaction]) -> BalanceSummary {
    let (income, expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), transaction| {
                match transaction.transaction_type {
                    TransactionType::Income => (income + transaction.amount, expense),
                    TransactionType::Expense => (income, expense + transaction.amount),
                }
            });

    BalanceSummary {
        income,
        expense,
        balance: income - expense,
    }
}

/// Group the transactions of one type by category.
///
/// Returns one entry per category present, sorted by amount (largest first).
/// Categories with equal amounts keep the order in which they were first seen.
/// Returns an empty list when no transaction has the requested type.
pub fn compute_category_breakdown(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<CategoryBreakdown> {
    let mut totals: Vec<(Category, Amount)> = Vec::new();
    let mut positions: HashMap<Category, usize> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
    {
        match positions.get(&transaction.category) {
            Some(&index) => totals[index].1 += transaction.amount,
            None => {
                positions.insert(transaction.category, totals.len());
                totals.push((transaction.category, transaction.amount));
            }
        }
    }

    let total: Amount = totals.iter().map(|(_, amount)| amount).sum();

    let mut breakdown: Vec<CategoryBreakdown> = totals
        .into_iter()
        .map(|(category, amount)| CategoryBreakdown {
            category,
            amount,
            percentage: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    // sort_by is stable, so ties stay in first-seen order
    breakdown.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    breakdown
}

/// Bucket transactions by the calendar day they were recorded on.
/// Returns one point per day that has transactions, oldest first.
pub fn compute_time_series(transactions: &[Transaction]) -> Vec<TimeSeriesPoint> {
    let mut days: BTreeMap<NaiveDate, (Amount, Amount)> = BTreeMap::new();

    for transaction in transactions {
        let entry = days.entry(transaction.day()).or_insert((0.0, 0.0));
        match transaction.transaction_type {
            TransactionType::Income => entry.0 += transaction.amount,
            TransactionType::Expense => entry.1 += transaction.amount,
        }
    }

    days.into_iter()
        .map(|(date, (income, expense))| TimeSeriesPoint {
            date,
            income,
            expense,
            balance: income - expense,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset};

    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn income(amount: Amount, category: Category, date: &str) -> Transaction {
        Transaction::new(amount, TransactionType::Income, category, at(date))
    }

    fn expense(amount: Amount, category: Category, date: &str) -> Transaction {
        Transaction::new(amount, TransactionType::Expense, category, at(date))
    }

    #[test]
    fn test_balance_summary_empty() {
        assert_eq!(compute_balance_summary(&[]), BalanceSummary::default());
    }

    #[test]
    fn test_balance_summary_mixed() {
        let transactions = vec![
            income(100.0, Category::Salary, "2024-01-01T00:00:00Z"),
            expense(40.0, Category::Food, "2024-01-01T00:00:00Z"),
            expense(20.0, Category::Food, "2024-01-02T00:00:00Z"),
        ];

        let summary = compute_balance_summary(&transactions);
        assert_eq!(summary.income, 100.0);
        assert_eq!(summary.expense, 60.0);
        assert_eq!(summary.balance, 40.0);
    }

    #[test]
    fn test_balance_can_be_negative() {
        let transactions = vec![expense(75.5, Category::Housing, "2024-01-01T00:00:00Z")];
        let summary = compute_balance_summary(&transactions);
        assert_eq!(summary.balance, -75.5);
    }

    #[test]
    fn test_breakdown_empty_when_type_missing() {
        let transactions = vec![income(100.0, Category::Salary, "2024-01-01T00:00:00Z")];
        assert!(compute_category_breakdown(&transactions, TransactionType::Expense).is_empty());
        assert!(compute_category_breakdown(&[], TransactionType::Income).is_empty());
    }

    #[test]
    fn test_breakdown_groups_and_sorts() {
        let transactions = vec![
            expense(10.0, Category::Food, "2024-01-01T00:00:00Z"),
            expense(50.0, Category::Housing, "2024-01-02T00:00:00Z"),
            expense(15.0, Category::Food, "2024-01-03T00:00:00Z"),
            income(999.0, Category::Salary, "2024-01-03T00:00:00Z"),
            expense(25.0, Category::Health, "2024-01-04T00:00:00Z"),
        ];

        let breakdown = compute_category_breakdown(&transactions, TransactionType::Expense);
        let categories: Vec<Category> = breakdown.iter().map(|b| b.category).collect();
        assert_eq!(
            categories,
            vec![Category::Housing, Category::Food, Category::Health]
        );
        assert_eq!(breakdown[1].amount, 25.0);
        assert_eq!(breakdown[0].percentage, 50.0);
        assert_eq!(breakdown[1].percentage, 25.0);
    }

    #[test]
    fn test_breakdown_ties_keep_first_seen_order() {
        let transactions = vec![
            expense(20.0, Category::Shopping, "2024-01-01T00:00:00Z"),
            expense(20.0, Category::Debt, "2024-01-01T00:00:00Z"),
            expense(30.0, Category::Utilities, "2024-01-01T00:00:00Z"),
            expense(20.0, Category::Education, "2024-01-01T00:00:00Z"),
        ];

        let breakdown = compute_category_breakdown(&transactions, TransactionType::Expense);
        let categories: Vec<Category> = breakdown.iter().map(|b| b.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Utilities,
                Category::Shopping,
                Category::Debt,
                Category::Education
            ]
        );
    }

    #[test]
    fn test_time_series_empty() {
        assert!(compute_time_series(&[]).is_empty());
    }

    #[test]
    fn test_time_series_buckets_by_day() {
        let transactions = vec![
            expense(20.0, Category::Food, "2024-01-02T18:00:00Z"),
            income(100.0, Category::Salary, "2024-01-01T09:00:00Z"),
            expense(40.0, Category::Food, "2024-01-01T20:15:00Z"),
        ];

        let series = compute_time_series(&transactions);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date.to_string(), "2024-01-01");
        assert_eq!(series[0].income, 100.0);
        assert_eq!(series[0].expense, 40.0);
        assert_eq!(series[0].balance, 60.0);
        assert_eq!(series[1].date.to_string(), "2024-01-02");
        assert_eq!(series[1].income, 0.0);
        assert_eq!(series[1].balance, -20.0);
    }

    #[test]
    fn test_time_series_uses_recorded_day_not_utc_day() {
        let transactions = vec![
            expense(5.0, Category::Food, "2024-01-01T23:00:00-03:00"),
            expense(7.0, Category::Food, "2024-01-02T01:00:00Z"),
        ];

        let series = compute_time_series(&transactions);
        // The first one is 02:00 UTC on the 2nd, yet it belongs to the 1st
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date.to_string(), "2024-01-01");
        assert_eq!(series[0].expense, 5.0);
    }
}
