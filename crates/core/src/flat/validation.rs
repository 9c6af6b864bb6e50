//! Structural checks run before a flat document is normalized.

use serde_json::Value;
use thiserror::Error;

use super::types::FlatPeriod;

/// The document failed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("flat document failed validation with {} issue(s)", issues.len())]
pub struct ValidationError {
    /// One message per problem, prefixed with the record index.
    pub issues: Vec<String>,
}

/// Checks that every period has both bounds and a numeric company id.
///
/// # Errors
///
/// Returns every issue found, not just the first.
pub fn validate_periods(periods: &[FlatPeriod]) -> Result<(), ValidationError> {
    let issues: Vec<String> = periods
        .iter()
        .enumerate()
        .flat_map(|(index, period)| period_issues(index, period))
        .collect();

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

fn period_issues(index: usize, period: &FlatPeriod) -> Vec<String> {
    let mut issues = Vec::new();

    if !is_present_text(period.period_start.as_ref()) {
        issues.push(format!("record {index}: missing period_start"));
    }
    if !is_present_text(period.period_end.as_ref()) {
        issues.push(format!("record {index}: missing period_end"));
    }
    match &period.company_id {
        Some(Value::Number(_)) => {}
        Some(_) => issues.push(format!("record {index}: company_id is not numeric")),
        None => issues.push(format!("record {index}: missing company_id")),
    }

    issues
}

fn is_present_text(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(text)) if !text.trim().is_empty())
}
