use serde::{Deserialize, Serialize};

use super::{CategoryBreakdown, TimeSeriesPoint};

const INCOME_FILL: &str = "rgba(16, 185, 129, 0.2)";
const INCOME_BORDER: &str = "rgb(16, 185, 129)";
const EXPENSE_FILL: &str = "rgba(239, 68, 68, 0.2)";
const EXPENSE_BORDER: &str = "rgb(239, 68, 68)";
const BALANCE_FILL: &str = "rgba(59, 130, 246, 0.2)";
const BALANCE_BORDER: &str = "rgb(59, 130, 246)";

/// Labeled series that any charting surface can draw.
///
/// An empty `labels` list is valid and means there is nothing to plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    /// One value per entry in [`ChartSeries::labels`]
    pub values: Vec<f64>,
    pub color: DatasetColor,
    pub border_width: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DatasetColor {
    /// One colour per data point (pie/doughnut charts)
    PerPoint { colors: Vec<String> },
    /// A single colour for the whole series (line/bar charts)
    Series { fill: String, border: String },
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Chart of a category breakdown: one slice per category, coloured from
/// the category palette.
pub fn project_category_chart(breakdown: &[CategoryBreakdown], series_label: &str) -> ChartSeries {
    ChartSeries {
        labels: breakdown
            .iter()
            .map(|item| item.category.as_str().to_string())
            .collect(),
        datasets: vec![Dataset {
            label: series_label.to_string(),
            values: breakdown.iter().map(|item| item.amount).collect(),
            color: DatasetColor::PerPoint {
                colors: breakdown
                    .iter()
                    .map(|item| item.category.color().to_string())
                    .collect(),
            },
            border_width: 1,
        }],
    }
}

/// Chart of the daily time series: income, expenses and balance per day.
pub fn project_time_series_chart(points: &[TimeSeriesPoint]) -> ChartSeries {
    let series = |label: &str, fill: &str, border: &str, value: fn(&TimeSeriesPoint) -> f64| {
        Dataset {
            label: label.to_string(),
            values: points.iter().map(value).collect(),
            color: DatasetColor::Series {
                fill: fill.to_string(),
                border: border.to_string(),
            },
            border_width: 2,
        }
    };

    ChartSeries {
        labels: points.iter().map(|point| point.date.to_string()).collect(),
        datasets: vec![
            series("Income", INCOME_FILL, INCOME_BORDER, |p| p.income),
            series("Expenses", EXPENSE_FILL, EXPENSE_BORDER, |p| p.expense),
            series("Balance", BALANCE_FILL, BALANCE_BORDER, |p| p.balance),
        ],
    }
}
