//! Ingestion orchestration.
//!
//! Fetch, normalize and persist one provider at a time, converting every
//! stage failure into a [`ProcessingResult`] instead of an error.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{FetchError, NormalizeError, PersistenceError, PipelineError};
pub use service::IngestionService;
pub use types::{
    EntityCounts, IngestionConfig, ProcessingResult, SourceId, SourceSettings,
};
