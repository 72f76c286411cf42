use std::fmt;

/// Amounts are plain floating-point values. Aggregation never rounds;
/// rounding only happens when an amount is formatted for display.
pub type Amount = f64;

/// Returns true if the amount can be recorded on a transaction.
pub fn is_valid_amount(amount: Amount) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Format an amount with two decimal places.
/// Example: 50.0 -> "50.00", -20.5 -> "-20.50"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a user-supplied amount.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, "100" -> 100.0
///
/// Only positive, finite values are accepted.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let amount: Amount = input
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !is_valid_amount(amount) {
        return Err(ParseAmountError::NotPositive);
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    NotPositive,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotPositive => write!(f, "amount must be greater than 0"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
