//! Statement normalization engine for finsync.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Provider documents come in through [`ports::StatementFetcher`] and canonical
//! records leave through [`ports::StatementStore`].
//!
//! # Modules
//!
//! - `schema` - Canonical period records and source key-mapping tables
//! - `tree` - Normalizer for the hierarchical row/column provider
//! - `flat` - Normalizer for the flat period-array provider
//! - `merge` - Cross-period category aggregation
//! - `pipeline` - Fetch, normalize and persist orchestration
//! - `ports` - Collaborator traits

pub mod flat;
pub mod merge;
pub mod pipeline;
pub mod ports;
pub mod schema;
pub mod tree;
