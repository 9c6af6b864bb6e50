//! `SeaORM` entity definitions.

#![allow(missing_docs)]

pub mod categories;
pub mod companies;
pub mod line_items;
pub mod report_periods;
