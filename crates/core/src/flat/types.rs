//! Wire types for the flat provider's period array.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The document: a bare array of periods or one wrapped in `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlatDocument {
    /// `{ "data": [...] }`.
    Wrapped {
        /// Periods.
        data: Vec<FlatPeriod>,
    },
    /// `[...]`.
    Bare(Vec<FlatPeriod>),
}

impl FlatDocument {
    /// Unwraps the period list.
    #[must_use]
    pub fn into_periods(self) -> Vec<FlatPeriod> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// One already period-scoped statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatPeriod {
    /// Period start, expected `YYYY-MM-DD`.
    #[serde(default)]
    pub period_start: Option<Value>,
    /// Period end.
    #[serde(default)]
    pub period_end: Option<Value>,
    /// Provider company identifier, expected numeric.
    #[serde(default)]
    pub company_id: Option<Value>,
    /// Every other field: statement concepts plus provider bookkeeping.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl FlatPeriod {
    /// Period start as text, empty when absent.
    #[must_use]
    pub fn start_date(&self) -> &str {
        self.period_start
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Period end as text, empty when absent.
    #[must_use]
    pub fn end_date(&self) -> &str {
        self.period_end
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// A statement concept: a list of categories or a single scalar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Categories, each with a total and its line items.
    Categories(Vec<FlatCategory>),
    /// A number, a string, `null`, or anything else.
    Scalar(Value),
}

/// A named category inside a concept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatCategory {
    /// Display name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Category total.
    #[serde(default)]
    pub value: Value,
    /// Provider account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Value>,
    /// Line items in provider order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub line_items: Vec<FlatLineItem>,
}

/// A named amount inside a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatLineItem {
    /// Display name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Amount.
    #[serde(default)]
    pub value: Value,
    /// Provider account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Value>,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a display name from a string or number; anything else is empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}
