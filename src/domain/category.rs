use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TransactionType;

/// Colour used for anything that has no entry in the category palette.
pub const FALLBACK_COLOR: &str = "#6B7280";

/// Closed classification tag on a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Salary,
    Investment,
    SideHustle,
    Gift,
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Health,
    Education,
    Shopping,
    Debt,
    Savings,
    Other,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Salary,
        Category::Investment,
        Category::SideHustle,
        Category::Gift,
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Shopping,
        Category::Debt,
        Category::Savings,
        Category::Other,
    ];

    const INCOME: [Category; 5] = [
        Category::Salary,
        Category::Investment,
        Category::SideHustle,
        Category::Gift,
        Category::Other,
    ];

    const EXPENSE: [Category; 11] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Shopping,
        Category::Debt,
        Category::Savings,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Investment => "investment",
            Category::SideHustle => "side-hustle",
            Category::Gift => "gift",
            Category::Food => "food",
            Category::Transportation => "transportation",
            Category::Housing => "housing",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Education => "education",
            Category::Shopping => "shopping",
            Category::Debt => "debt",
            Category::Savings => "savings",
            Category::Other => "other",
        }
    }

    /// Decode a persisted category name. Unknown names become `Other`.
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::warn!(category = s, "unknown category, treating as other");
            Category::Other
        })
    }

    /// Categories offered when recording a transaction of the given type.
    pub fn suggested_for(transaction_type: TransactionType) -> &'static [Category] {
        match transaction_type {
            TransactionType::Income => &Self::INCOME,
            TransactionType::Expense => &Self::EXPENSE,
        }
    }

    /// The category preselected for a new transaction of the given type.
    pub fn is_suggested_for(&self, transaction_type: TransactionType) -> bool {
        Self::suggested_for(transaction_type).contains(self)
    }

    pub fn default_for(transaction_type: TransactionType) -> Self {
        match transaction_type {
            TransactionType::Income => Category::Salary,
            TransactionType::Expense => Category::Food,
        }
    }

    /// Palette colour (hex) used when charting this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Salary => "#3B82F6",
            Category::Investment => "#10B981",
            Category::SideHustle => "#8B5CF6",
            Category::Gift => "#F472B6",
            Category::Food => "#F59E0B",
            Category::Transportation => "#6366F1",
            Category::Housing => "#EC4899",
            Category::Utilities => "#64748B",
            Category::Entertainment => "#F97316",
            Category::Health => "#14B8A6",
            Category::Education => "#8B5CF6",
            Category::Shopping => "#EF4444",
            Category::Debt => "#9CA3AF",
            Category::Savings => "#10B981",
            Category::Other => FALLBACK_COLOR,
        }
    }

    /// Human-readable label, e.g. "Side hustle".
    pub fn display_name(&self) -> String {
        let name = self.as_str().replacen('-', " ", 1);
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Colour for an arbitrary chart label, falling back to [`FALLBACK_COLOR`].
/// Only exact category names (`"side-hustle"`, not `"Side hustle"`) match.
pub fn color_for_label(label: &str) -> &'static str {
    Category::ALL
        .iter()
        .find(|category| category.as_str() == label)
        .map(|category| category.color())
        .unwrap_or(FALLBACK_COLOR)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);
