//! Cross-period category merging.
//!
//! Categories that share a display name within an exact period-bound match
//! are collapsed into one [`MergedCategory`].

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;

pub use error::MergeError;
pub use service::MergeService;
pub use types::{CompanyRef, MergedCategory, PeriodRef, StoredCategory};
