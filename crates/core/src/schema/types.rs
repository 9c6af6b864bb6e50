//! Canonical period record types.

use finsync_shared::types::CompanyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the nine canonical income-statement categories.
///
/// Declaration order is the canonical order used everywhere categories are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    /// Revenue.
    Income,
    /// Cost of goods sold.
    Cogs,
    /// Income minus cost of goods sold.
    GrossProfit,
    /// Operating expenses.
    Expenses,
    /// Gross profit minus operating expenses.
    OperatingIncome,
    /// Non-operating income.
    OtherIncome,
    /// Non-operating expenses.
    OtherExpenses,
    /// Other income minus other expenses.
    NetOtherIncome,
    /// Bottom line.
    NetIncome,
}

impl CategoryKey {
    /// All keys in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Income,
        Self::Cogs,
        Self::GrossProfit,
        Self::Expenses,
        Self::OperatingIncome,
        Self::OtherIncome,
        Self::OtherExpenses,
        Self::NetOtherIncome,
        Self::NetIncome,
    ];

    /// Returns the snake_case key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Cogs => "cogs",
            Self::GrossProfit => "gross_profit",
            Self::Expenses => "expenses",
            Self::OperatingIncome => "operating_income",
            Self::OtherIncome => "other_income",
            Self::OtherExpenses => "other_expenses",
            Self::NetOtherIncome => "net_other_income",
            Self::NetIncome => "net_income",
        }
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown category key: {s}"))
    }
}

/// Lower-cases a name and collapses every non-alphanumeric run into `_`.
///
/// `"Product A"` becomes `"product_a"`.
#[must_use]
pub fn snake_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            key.extend(ch.to_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    while key.ends_with('_') {
        key.pop();
    }
    key
}

/// Target of a key-mapping table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    /// One of the nine canonical categories.
    Category(CategoryKey),
    /// Optional tax line, only reported by some providers.
    Taxes,
}

/// Fixed-field record holding one `T` per canonical category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories<T> {
    /// Income.
    pub income: T,
    /// Cost of goods sold.
    pub cogs: T,
    /// Gross profit.
    pub gross_profit: T,
    /// Operating expenses.
    pub expenses: T,
    /// Operating income.
    pub operating_income: T,
    /// Other income.
    pub other_income: T,
    /// Other expenses.
    pub other_expenses: T,
    /// Net other income.
    pub net_other_income: T,
    /// Net income.
    pub net_income: T,
}

impl<T> Categories<T> {
    /// Builds a record by calling `f` once per key, in canonical order.
    pub fn from_fn(mut f: impl FnMut(CategoryKey) -> T) -> Self {
        Self {
            income: f(CategoryKey::Income),
            cogs: f(CategoryKey::Cogs),
            gross_profit: f(CategoryKey::GrossProfit),
            expenses: f(CategoryKey::Expenses),
            operating_income: f(CategoryKey::OperatingIncome),
            other_income: f(CategoryKey::OtherIncome),
            other_expenses: f(CategoryKey::OtherExpenses),
            net_other_income: f(CategoryKey::NetOtherIncome),
            net_income: f(CategoryKey::NetIncome),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub const fn get(&self, key: CategoryKey) -> &T {
        match key {
            CategoryKey::Income => &self.income,
            CategoryKey::Cogs => &self.cogs,
            CategoryKey::GrossProfit => &self.gross_profit,
            CategoryKey::Expenses => &self.expenses,
            CategoryKey::OperatingIncome => &self.operating_income,
            CategoryKey::OtherIncome => &self.other_income,
            CategoryKey::OtherExpenses => &self.other_expenses,
            CategoryKey::NetOtherIncome => &self.net_other_income,
            CategoryKey::NetIncome => &self.net_income,
        }
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: CategoryKey) -> &mut T {
        match key {
            CategoryKey::Income => &mut self.income,
            CategoryKey::Cogs => &mut self.cogs,
            CategoryKey::GrossProfit => &mut self.gross_profit,
            CategoryKey::Expenses => &mut self.expenses,
            CategoryKey::OperatingIncome => &mut self.operating_income,
            CategoryKey::OtherIncome => &mut self.other_income,
            CategoryKey::OtherExpenses => &mut self.other_expenses,
            CategoryKey::NetOtherIncome => &mut self.net_other_income,
            CategoryKey::NetIncome => &mut self.net_income,
        }
    }

    /// Iterates `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, &T)> {
        CategoryKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// A single named amount inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Normalized display name.
    pub key: String,
    /// Label as the provider wrote it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Amount.
    pub value: Decimal,
    /// Provider account identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

/// One reporting interval for one company, in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Owning company.
    pub company_id: CompanyId,
    /// Inclusive period start (`YYYY-MM-DD` as supplied by the provider).
    pub start_date: String,
    /// Inclusive period end.
    pub end_date: String,
    /// Category amounts, zero when the provider omits them.
    #[serde(flatten)]
    pub amounts: Categories<Decimal>,
    /// Tax amount, only for providers that report one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Decimal>,
    /// Line items per category, in provider traversal order.
    pub line_items: Categories<Vec<LineItem>>,
}

impl PeriodRecord {
    /// Creates a record with every amount at zero and no line items.
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            company_id,
            start_date: start_date.into(),
            end_date: end_date.into(),
            amounts: Categories::default(),
            taxes: None,
            line_items: Categories::default(),
        }
    }

    /// Returns the amount stored under `key`.
    #[must_use]
    pub const fn amount(&self, key: CategoryKey) -> Decimal {
        *self.amounts.get(key)
    }

    /// Total number of line items across all categories.
    #[must_use]
    pub fn line_item_count(&self) -> usize {
        self.line_items.iter().map(|(_, items)| items.len()).sum()
    }
}
