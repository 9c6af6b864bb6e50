//! Ingestion pipeline error types.

use thiserror::Error;

use super::types::SourceId;
use crate::flat::ValidationError;

/// Raw document could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Request to {location} failed: {message}")]
    Request {
        /// Where the document was requested from.
        location: String,
        /// Transport error.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("{location} answered with status {status}")]
    Status {
        /// Where the document was requested from.
        location: String,
        /// HTTP status code.
        status: u16,
    },

    /// A local document could not be read.
    #[error("Failed to read {location}: {message}")]
    Io {
        /// File path.
        location: String,
        /// I/O error.
        message: String,
    },

    /// The body is not JSON.
    #[error("{location} is not valid JSON: {message}")]
    Parse {
        /// Where the document came from.
        location: String,
        /// Parser error.
        message: String,
    },
}

/// JSON document does not have the provider's shape.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Decoding into the provider's document type failed.
    #[error("{provider} document could not be decoded: {message}")]
    Decode {
        /// Provider whose document was rejected.
        provider: SourceId,
        /// Decoder error.
        message: String,
    },
}

/// The persistence collaborator failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A record carries a date the store cannot hold.
    #[error("Invalid period date: {0}")]
    InvalidDate(String),

    /// Database failure; the whole batch was rolled back.
    #[error("Database error: {0}")]
    Database(String),
}

/// Any stage failure for one source.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetch stage.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Decode stage.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Structural validation stage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Save stage.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl PipelineError {
    /// Flattens the failure into the error strings reported to callers.
    ///
    /// Validation failures contribute one string per issue.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(err) => err.issues.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Short stage name used in logs and summaries.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Normalize(_) => "normalize",
            Self::Validation(_) => "validation",
            Self::Persistence(_) => "persistence",
        }
    }
}
