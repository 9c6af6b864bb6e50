//! Ingestion pipeline data types.

use std::ops::Add;

use finsync_shared::types::CompanyId;
use serde::{Deserialize, Serialize};

/// Which provider a document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    /// Hierarchical row/column report provider.
    Tree,
    /// Flat period-array provider.
    Flat,
}

impl SourceId {
    /// Both sources, in processing order.
    pub const ALL: [Self; 2] = [Self::Tree, Self::Flat];

    /// Returns the lowercase identifier used in routes and config.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Flat => "flat",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Self::Tree),
            "flat" => Ok(Self::Flat),
            _ => Err(format!("Unknown source: {s}")),
        }
    }
}

/// Where to fetch one source and whom it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// URL or file path of the raw document.
    pub location: String,
    /// Company name the records are saved under.
    pub company_name: String,
    /// Company id stamped on every normalized record.
    pub company_id: CompanyId,
}

/// Settings for both sources plus normalization defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionConfig {
    /// Tree provider.
    pub tree: SourceSettings,
    /// Flat provider.
    pub flat: SourceSettings,
    /// Group label for tree rows with no group ancestor.
    pub default_group: String,
}

impl IngestionConfig {
    /// Returns the settings for `source`.
    #[must_use]
    pub const fn source(&self, source: SourceId) -> &SourceSettings {
        match source {
            SourceId::Tree => &self.tree,
            SourceId::Flat => &self.flat,
        }
    }
}

/// Number of stored entities, either written by one save or held overall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    /// Companies.
    pub companies: u64,
    /// Report periods.
    pub report_periods: u64,
    /// Categories.
    pub categories: u64,
    /// Line items.
    pub line_items: u64,
}

impl Add for EntityCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            companies: self.companies + rhs.companies,
            report_periods: self.report_periods + rhs.report_periods,
            categories: self.categories + rhs.categories,
            line_items: self.line_items + rhs.line_items,
        }
    }
}

/// Outcome of processing one or more sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Whether every processed source committed.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Entities written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<EntityCounts>,
    /// Stage failures as strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ProcessingResult {
    /// Successful result carrying the written counts.
    #[must_use]
    pub fn succeeded(message: impl Into<String>, counts: EntityCounts) -> Self {
        Self {
            success: true,
            message: message.into(),
            results: Some(counts),
            errors: None,
        }
    }

    /// Failed result carrying the error strings.
    #[must_use]
    pub fn failed(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            results: None,
            errors: Some(errors),
        }
    }

    /// Combines several per-source results.
    ///
    /// Success is the logical AND, counts are added pairwise (a failed source
    /// adds zero) and error lists are concatenated in input order.
    #[must_use]
    pub fn combine(results: Vec<Self>) -> Self {
        let success = results.iter().all(|r| r.success);
        let counts = results
            .iter()
            .filter_map(|r| r.results)
            .fold(EntityCounts::default(), Add::add);
        let errors: Vec<String> = results
            .into_iter()
            .filter_map(|r| r.errors)
            .flatten()
            .collect();

        let message = if success {
            "All sources processed successfully".to_string()
        } else {
            "One or more sources failed to process".to_string()
        };

        Self {
            success,
            message,
            results: Some(counts),
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}
