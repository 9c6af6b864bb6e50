//! Row-tree walker for the hierarchical provider.

use finsync_shared::types::CompanyId;
use tracing::{debug, warn};

use super::types::{Cell, Columns, Row, TreeReport};
use crate::schema::amount::cell_amount;
use crate::schema::{
    CategoryKey, KeyMap, LineItem, MappingGap, MappingObserver, PeriodRecord, SilentObserver,
};

/// Rows nested deeper than this are skipped. Root rows are depth 1.
pub const MAX_ROW_DEPTH: usize = 8;

/// A money column that carries both period bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    /// Index of the column; cells at this index belong to the period.
    pub column: usize,
    /// Period start.
    pub start_date: String,
    /// Period end.
    pub end_date: String,
}

/// How a row contributes, decided from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Subtotal row (`Summary...`, `Net...`).
    Summary,
    /// Grand total row (`Total ...`).
    Total,
    /// Anything else; may become line items.
    Normal,
}

/// Classifies a row label by case-insensitive prefix, first match wins.
#[must_use]
pub fn classify(label: &str) -> RowKind {
    let lower = label.to_lowercase();
    if lower.starts_with("summary") || lower.starts_with("net") {
        RowKind::Summary
    } else if lower.starts_with("total ") {
        RowKind::Total
    } else {
        RowKind::Normal
    }
}

/// Collects the period columns in column order.
#[must_use]
pub fn extract_periods(columns: &Columns) -> Vec<ReportPeriod> {
    columns
        .column
        .iter()
        .enumerate()
        .filter(|(_, column)| column.col_type.eq_ignore_ascii_case("money"))
        .filter_map(|(index, column)| {
            Some(ReportPeriod {
                column: index,
                start_date: column.meta("StartDate")?.to_string(),
                end_date: column.meta("EndDate")?.to_string(),
            })
        })
        .collect()
}

/// Normalizes hierarchical reports into canonical period records.
#[derive(Debug, Clone)]
pub struct TreeNormalizer<'k> {
    keys: &'k KeyMap,
    company_id: CompanyId,
    default_group: String,
}

impl<'k> TreeNormalizer<'k> {
    /// Creates a normalizer routing group names through `keys`.
    #[must_use]
    pub fn new(keys: &'k KeyMap, company_id: CompanyId, default_group: impl Into<String>) -> Self {
        Self {
            keys,
            company_id,
            default_group: default_group.into(),
        }
    }

    /// Normalizes a report, dropping unmapped rows silently.
    #[must_use]
    pub fn normalize(&self, report: &TreeReport) -> Vec<PeriodRecord> {
        self.normalize_with(report, &mut SilentObserver)
    }

    /// Normalizes a report, reporting every dropped row to `observer`.
    pub fn normalize_with(
        &self,
        report: &TreeReport,
        observer: &mut dyn MappingObserver,
    ) -> Vec<PeriodRecord> {
        let periods = extract_periods(&report.columns);
        let records = periods
            .iter()
            .map(|p| PeriodRecord::new(self.company_id, &p.start_date, &p.end_date))
            .collect();

        let mut walker = RowWalker {
            normalizer: self,
            periods: &periods,
            records,
            observer,
        };
        for row in &report.rows.row {
            walker.visit(row, None, 1);
        }
        walker.records
    }

    fn category_for(&self, group: &str) -> Option<CategoryKey> {
        self.keys.resolve_category(group)
    }
}

struct RowWalker<'a, 'k> {
    normalizer: &'a TreeNormalizer<'k>,
    periods: &'a [ReportPeriod],
    records: Vec<PeriodRecord>,
    observer: &'a mut dyn MappingObserver,
}

impl RowWalker<'_, '_> {
    fn visit(&mut self, row: &Row, inherited_group: Option<&str>, depth: usize) {
        if depth > MAX_ROW_DEPTH {
            warn!(label = row.label(), depth, "Row nested too deep, skipping subtree");
            self.observer.on_gap(MappingGap::DepthExceeded {
                label: row.label().to_string(),
                depth,
            });
            return;
        }

        let normalizer = self.normalizer;
        let group = row.group.as_deref().or(inherited_group);
        let group_name = group.unwrap_or(&normalizer.default_group);
        let category = normalizer.category_for(group_name);

        if let (Some(summary), Some(key)) = (&row.summary, category) {
            for (record, period) in self.records.iter_mut().zip(self.periods) {
                let text = summary.col_data.get(period.column).map(|c| c.value.as_str());
                *record.amounts.get_mut(key) = cell_amount(text);
            }
        }

        if let Some(cells) = &row.col_data {
            let label = row.label();
            if classify(label) == RowKind::Normal {
                match category {
                    Some(key) => self.push_line_items(key, label, cells),
                    None => {
                        debug!(group = group_name, label, "Row group has no canonical key");
                        self.observer.on_gap(MappingGap::UnmappedGroup {
                            group: group_name.to_string(),
                            label: label.to_string(),
                        });
                    }
                }
            }
        }

        for child in row.children() {
            self.visit(child, group, depth + 1);
        }
    }

    fn push_line_items(&mut self, key: CategoryKey, label: &str, cells: &[Cell]) {
        let account_id = cells.first().and_then(|c| c.id.clone());

        for (record, period) in self.records.iter_mut().zip(self.periods) {
            let text = cells.get(period.column).map(|c| c.value.as_str());
            record.line_items.get_mut(key).push(LineItem {
                key: label.to_string(),
                original_name: Some(label.to_string()),
                value: cell_amount(text),
                account_id: account_id.clone(),
            });
        }
    }
}
