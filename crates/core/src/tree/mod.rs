//! Normalizer for the hierarchical (row/column tree) statement provider.
//!
//! The provider sends a report whose columns describe periods and whose rows
//! nest into groups. Groups decide the canonical category; summary rows carry
//! authoritative subtotals; plain data rows become line items.

pub mod normalizer;
pub mod types;

#[cfg(test)]
mod props;

pub use normalizer::{
    MAX_ROW_DEPTH, ReportPeriod, RowKind, TreeNormalizer, classify, extract_periods,
};
pub use types::{Cell, CellRow, Column, Columns, MetaData, Row, Rows, TreeReport};
