//! Visibility into rows and fields the normalizers drop.
//!
//! Dropping stays silent by default; callers that care pass an observer.

use serde::Serialize;

/// Something a normalizer could not place under a canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingGap {
    /// A tree row whose group has no canonical key.
    UnmappedGroup {
        /// Resolved group name.
        group: String,
        /// Row label.
        label: String,
    },
    /// A flat period field holding categories that no table entry names.
    UnmappedField {
        /// Field name as it appears in the document.
        field: String,
    },
    /// A tree row nested deeper than the walker descends.
    DepthExceeded {
        /// Row label.
        label: String,
        /// Depth of the skipped row (root rows are depth 1).
        depth: usize,
    },
}

/// Receives mapping gaps as they are found.
pub trait MappingObserver {
    /// Called once per gap, in traversal order.
    fn on_gap(&mut self, gap: MappingGap);
}

/// Observer that discards every gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl MappingObserver for SilentObserver {
    fn on_gap(&mut self, _gap: MappingGap) {}
}

impl MappingObserver for Vec<MappingGap> {
    fn on_gap(&mut self, gap: MappingGap) {
        self.push(gap);
    }
}
