//! Merge error types.

use finsync_shared::types::DateFormatError;
use thiserror::Error;

/// Errors that can occur while merging categories.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A bound is not a strict `YYYY-MM-DD` date.
    #[error(transparent)]
    InvalidDate(#[from] DateFormatError),

    /// The category source failed.
    #[error("Category lookup failed: {0}")]
    Store(String),
}
