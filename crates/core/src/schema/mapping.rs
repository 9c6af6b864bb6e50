//! Source-to-canonical key-mapping tables.
//!
//! Both providers resolve their labels the same way: an exact match first,
//! then an ASCII case-insensitive match. Tables are plain constants handed to
//! each normalizer, never looked up from inside one.

use std::collections::BTreeMap;

use super::types::{CanonicalField, CategoryKey};

/// Ordered, immutable table of source labels to canonical fields.
#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    entries: &'static [(&'static str, CanonicalField)],
}

impl KeyMap {
    /// Wraps a static table.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, CanonicalField)]) -> Self {
        Self { entries }
    }

    /// Table entries in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &'static [(&'static str, CanonicalField)] {
        self.entries
    }

    /// Resolves a source label to its canonical field.
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<CanonicalField> {
        self.entries
            .iter()
            .find(|(source, _)| *source == label)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(source, _)| source.eq_ignore_ascii_case(label))
            })
            .map(|(_, field)| *field)
    }

    /// Resolves a source label to a canonical category, ignoring `Taxes`.
    #[must_use]
    pub fn resolve_category(&self, label: &str) -> Option<CategoryKey> {
        match self.resolve(label)? {
            CanonicalField::Category(key) => Some(key),
            CanonicalField::Taxes => None,
        }
    }

    /// Returns true if the label resolves to any entry.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.resolve(label).is_some()
    }
}

/// Looks up `key` in a document map with the same exact-then-case-insensitive rule.
pub fn lookup_field<'a, V>(fields: &'a BTreeMap<String, V>, key: &str) -> Option<&'a V> {
    fields.get(key).or_else(|| {
        fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

use CanonicalField::{Category, Taxes};
use CategoryKey::{
    Cogs, Expenses, GrossProfit, Income, NetIncome, NetOtherIncome, OperatingIncome,
    OtherExpenses, OtherIncome,
};

const TREE_ENTRIES: &[(&str, CanonicalField)] = &[
    ("Income", Category(Income)),
    ("COGS", Category(Cogs)),
    ("GrossProfit", Category(GrossProfit)),
    ("Expenses", Category(Expenses)),
    ("NetOperatingIncome", Category(OperatingIncome)),
    ("OtherIncome", Category(OtherIncome)),
    ("OtherExpenses", Category(OtherExpenses)),
    ("NetOtherIncome", Category(NetOtherIncome)),
    ("NetIncome", Category(NetIncome)),
];

const FLAT_ENTRIES: &[(&str, CanonicalField)] = &[
    ("revenue", Category(Income)),
    ("cost_of_goods_sold", Category(Cogs)),
    ("gross_profit", Category(GrossProfit)),
    ("operating_expenses", Category(Expenses)),
    ("operating_profit", Category(OperatingIncome)),
    ("non_operating_revenue", Category(OtherIncome)),
    ("non_operating_expenses", Category(OtherExpenses)),
    ("net_non_operating_income", Category(NetOtherIncome)),
    ("net_profit", Category(NetIncome)),
    ("taxes", Taxes),
];

/// Group names used by the hierarchical (row/column tree) provider.
pub const TREE_KEYS: KeyMap = KeyMap::new(TREE_ENTRIES);

/// Concept fields used by the flat (period array) provider.
pub const FLAT_KEYS: KeyMap = KeyMap::new(FLAT_ENTRIES);
