//! Normalizer for the flat (period array) statement provider.
//!
//! Each element of the document is already one period. Concepts are either
//! plain amounts or arrays of categories with nested line items.

pub mod normalizer;
pub mod types;
pub mod validation;


pub use normalizer::FlatNormalizer;
pub use types::{FieldValue, FlatCategory, FlatDocument, FlatLineItem, FlatPeriod};
pub use validation::{ValidationError, validate_periods};
