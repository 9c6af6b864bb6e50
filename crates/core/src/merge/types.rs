//! Category merge data types.

use finsync_shared::types::{CategoryId, CompanyId, ReportDate, ReportPeriodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schema::LineItem;

/// Company reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    /// Company ID.
    pub id: CompanyId,
    /// Company name.
    pub name: String,
}

/// Report period reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRef {
    /// Period ID.
    pub id: ReportPeriodId,
    /// Period start.
    pub start_date: ReportDate,
    /// Period end.
    pub end_date: ReportDate,
    /// Owning company ID.
    pub company_id: CompanyId,
}

/// A stored category with everything needed to merge it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Display name; the merge grouping identity.
    pub name: String,
    /// Category type.
    pub category_type: String,
    /// Category amount.
    pub value: Decimal,
    /// Line items in stored order.
    pub line_items: Vec<LineItem>,
    /// Owning period.
    pub period: PeriodRef,
    /// Owning company.
    pub company: CompanyRef,
}

/// All categories sharing one name within a period-bound match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedCategory {
    /// Identifier derived from the name.
    pub id: String,
    /// Shared display name.
    pub name: String,
    /// Sum of the merged values.
    pub value: Decimal,
    /// Category type of the first contributor.
    pub category_type: String,
    /// Every contributor's line items, in retrieval order.
    pub line_items: Vec<LineItem>,
    /// Every contributing period.
    pub report_periods: Vec<PeriodRef>,
    /// Contributing companies, each listed once.
    pub companies: Vec<CompanyRef>,
}
