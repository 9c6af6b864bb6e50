//! Category merge service.

use finsync_shared::types::ReportDate;
use tracing::debug;

use super::error::MergeError;
use super::types::{MergedCategory, StoredCategory};
use crate::ports::StatementStore;
use crate::schema::amount::add_amounts;
use crate::schema::snake_key;

/// Service for collapsing same-named categories across periods and companies.
pub struct MergeService;

impl MergeService {
    /// Merges stored categories by display name.
    ///
    /// Values are summed, line items concatenated in input order, every row
    /// contributes its period, and companies are kept once per id. The output
    /// is sorted by name; ties cannot occur because names are unique after
    /// grouping.
    #[must_use]
    pub fn merge(categories: Vec<StoredCategory>) -> Vec<MergedCategory> {
        let mut merged = categories
            .into_iter()
            .fold(Vec::<MergedCategory>::new(), |mut acc, category| {
                match acc.iter().position(|m| m.name == category.name) {
                    Some(index) => Self::absorb(&mut acc[index], category),
                    None => acc.push(Self::start(category)),
                }
                acc
            });

        merged.sort_by(|a, b| a.name.cmp(&b.name));
        merged
    }

    /// Validates both bounds, loads the matching categories and merges them.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidDate`] before touching the store when either
    /// bound is not a strict `YYYY-MM-DD` date, and [`MergeError::Store`] when
    /// the lookup fails.
    pub async fn merge_by_date_range<S>(
        store: &S,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<MergedCategory>, MergeError>
    where
        S: StatementStore + ?Sized,
    {
        let start = ReportDate::parse(start_date)?;
        let end = ReportDate::parse(end_date)?;

        let categories = store
            .find_categories_by_period_bounds(start, end)
            .await
            .map_err(|e| MergeError::Store(e.to_string()))?;

        debug!(%start, %end, rows = categories.len(), "Merging categories");
        Ok(Self::merge(categories))
    }

    fn start(category: StoredCategory) -> MergedCategory {
        MergedCategory {
            id: snake_key(&category.name),
            name: category.name,
            value: category.value,
            category_type: category.category_type,
            line_items: category.line_items,
            report_periods: vec![category.period],
            companies: vec![category.company],
        }
    }

    fn absorb(merged: &mut MergedCategory, category: StoredCategory) {
        merged.value = add_amounts(merged.value, category.value);
        merged.line_items.extend(category.line_items);
        merged.report_periods.push(category.period);
        if !merged.companies.iter().any(|c| c.id == category.company.id) {
            merged.companies.push(category.company);
        }
    }
}
