//! Coercion of provider text and JSON into decimal amounts.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

/// Parses a decimal written as plain or scientific notation.
#[must_use]
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Reads a report cell. Missing, blank and non-numeric cells count as zero.
#[must_use]
pub fn cell_amount(text: Option<&str>) -> Decimal {
    text.and_then(parse_decimal).unwrap_or_default()
}

/// Adds two amounts, clamping at the representable bounds instead of
/// overflowing.
#[must_use]
pub fn add_amounts(left: Decimal, right: Decimal) -> Decimal {
    left.checked_add(right).unwrap_or_else(|| {
        warn!(%left, %right, "Amount addition overflowed, clamping");
        left.saturating_add(right)
    })
}

/// Reads a JSON number or numeric string.
#[must_use]
pub fn json_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

/// Renders a JSON scalar identifier as text.
#[must_use]
pub fn json_id(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
