//! Strict `YYYY-MM-DD` report dates.
//!
//! Period bounds are matched by exact equality, so callers must not be able to
//! smuggle in `2023-1-1` or `01-01-2023` and silently miss every period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar date that was written exactly as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportDate(NaiveDate);

/// Rejected date input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{value}': expected YYYY-MM-DD")]
pub struct DateFormatError {
    /// The offending input.
    pub value: String,
}

impl ReportDate {
    /// Parses a date, rejecting anything but the exact `YYYY-MM-DD` shape.
    ///
    /// # Errors
    ///
    /// Returns `DateFormatError` for a wrong shape or an impossible calendar date.
    pub fn parse(value: &str) -> Result<Self, DateFormatError> {
        let bytes = value.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });

        if !shape_ok {
            return Err(DateFormatError {
                value: value.to_string(),
            });
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateFormatError {
                value: value.to_string(),
            })
    }

    /// Returns the underlying date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ReportDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for ReportDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for ReportDate {
    type Err = DateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReportDate {
    type Error = DateFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReportDate> for String {
    fn from(date: ReportDate) -> Self {
        date.to_string()
    }
}

#[cfg(test)]
#[path = "date_tests.rs"]
mod tests;
