//! Money Module
//!
//! All monetary values (game prices, order totals, sales KPIs) are exact
//! `rust_decimal::Decimal` values. Binary floating point never touches money.
//!
//! ## Usage
//! ```rust
//! use gamestore_admin::money::{parse_amount, format_amount};
//!
//! let price = parse_amount("19.99", 2).unwrap();
//! assert_eq!(format_amount(price), "19.99");
//! ```

use rust_decimal::prelude::*;
use thiserror::Error;

/// Monetary amount in the store currency
pub type Money = Decimal;

/// Upper bound (exclusive) for amounts entered through admin forms
pub const MAX_FORM_AMOUNT: i64 = 1_000_000;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("Enter a number.")]
    InvalidFormat(String),

    #[error("Ensure this value is greater than or equal to 0.")]
    Negative,

    #[error("Ensure that there are no more than {max} decimal places.")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Ensure that there are no more than {max_integer_digits} digits before the decimal point.")]
    TooLarge { max_integer_digits: u32 },
}

// ============================================================================
// Parse / Format
// ============================================================================

/// Parse a non-negative amount entered by an admin.
///
/// Trailing zeros beyond `max_decimals` are accepted ("5.000" is 5.00);
/// significant digits beyond it are rejected rather than rounded.
pub fn parse_amount(amount_str: &str, max_decimals: u32) -> Result<Money, MoneyError> {
    let trimmed = amount_str.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|_| MoneyError::InvalidFormat(trimmed.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::Negative);
    }

    let normalized = value.normalize();
    if normalized.scale() > max_decimals {
        return Err(MoneyError::PrecisionOverflow {
            provided: normalized.scale(),
            max: max_decimals,
        });
    }

    if normalized >= Decimal::from(MAX_FORM_AMOUNT) {
        return Err(MoneyError::TooLarge {
            max_integer_digits: 6,
        });
    }

    let mut amount = normalized;
    amount.rescale(max_decimals);
    Ok(amount)
}

/// Format an amount for display with two decimal places
pub fn format_amount(amount: Money) -> String {
    format!("{:.2}", amount)
}

// ============================================================================
// Aggregates
// ============================================================================

/// Exact sum of the given amounts. Zero for an empty input.
pub fn sum<I>(amounts: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, v| acc + v)
}
