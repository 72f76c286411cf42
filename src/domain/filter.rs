use chrono::{DateTime, FixedOffset, NaiveDate};
use thiserror::Error;

use super::{Category, Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),
}

/// Criteria used to narrow a list of transactions.
/// Every field is optional; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Inclusive lower bound
    pub start_date: Option<DateTime<FixedOffset>>,
    /// Inclusive upper bound
    pub end_date: Option<DateTime<FixedOffset>>,
    pub category: Option<Category>,
    pub transaction_type: Option<TransactionType>,
    /// Case-insensitive text matched against description, category and type
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_date(mut self, start_date: DateTime<FixedOffset>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: DateTime<FixedOffset>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns true if no criterion is set.
    pub fn is_unconstrained(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.category.is_none()
            && self.transaction_type.is_none()
            && self.search_term().is_none()
    }

    /// Returns true if the transaction passes every supplied criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(start) = self.start_date {
            if transaction.date < start {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if transaction.date > end {
                return false;
            }
        }

        if let Some(category) = self.category {
            if transaction.category != category {
                return false;
            }
        }

        if let Some(transaction_type) = self.transaction_type {
            if transaction.transaction_type != transaction_type {
                return false;
            }
        }

        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let hit = transaction.description.to_lowercase().contains(&term)
                || transaction.category.as_str().contains(&term)
                || transaction.transaction_type.as_str().contains(&term);
            if !hit {
                return false;
            }
        }

        true
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Keep the transactions that match the criteria, in their original order.
pub fn filter_transactions(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}

/// Parse a date bound for filtering.
///
/// Accepts an RFC 3339 timestamp (`2024-01-31T18:00:00+01:00`) or a plain
/// date (`2024-01-31`), which is taken as midnight UTC of that day.
pub fn parse_date_bound(input: &str) -> Result<DateTime<FixedOffset>, FilterError> {
    let input = input.trim();

    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Ok(date_time);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| FilterError::InvalidDate(input.to_string()))
}

/// Like [`parse_date_bound`], but blank or missing input means no bound.
pub fn parse_optional_bound(
    input: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, FilterError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date_bound(s).map(Some),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
}

impl SortKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "date" => Some(SortKey::Date),
            "amount" => Some(SortKey::Amount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Sort transactions for display. The sort is stable.
pub fn sort_transactions(transactions: &mut [Transaction], key: SortKey, direction: SortDirection) {
    transactions.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.total_cmp(&b.amount),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

impl From<bool> for SortDirection {
    /// `true` means ascending.
    fn from(ascending: bool) -> Self {
        if ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }
}
