//! Canonical statement schema shared by every provider.
//!
//! A [`PeriodRecord`] carries the same nine category amounts whatever its
//! source; providers differ only in the [`KeyMap`] that routes their labels.

pub mod amount;
pub mod diagnostics;
pub mod mapping;
pub mod types;


pub use diagnostics::{MappingGap, MappingObserver, SilentObserver};
pub use mapping::{FLAT_KEYS, KeyMap, TREE_KEYS, lookup_field};
pub use types::{CanonicalField, Categories, CategoryKey, LineItem, PeriodRecord, snake_key};
