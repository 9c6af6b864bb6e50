//! Period-array reducer for the flat provider.

use finsync_shared::types::CompanyId;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{FieldValue, FlatCategory, FlatLineItem, FlatPeriod};
use crate::schema::amount::{add_amounts, json_amount, json_id};
use crate::schema::{
    CanonicalField, KeyMap, LineItem, MappingGap, MappingObserver, PeriodRecord, SilentObserver,
    lookup_field, snake_key,
};

/// Normalizes flat period arrays into canonical period records.
#[derive(Debug, Clone)]
pub struct FlatNormalizer<'k> {
    keys: &'k KeyMap,
    company_id: CompanyId,
}

impl<'k> FlatNormalizer<'k> {
    /// Creates a normalizer routing concept fields through `keys`.
    #[must_use]
    pub const fn new(keys: &'k KeyMap, company_id: CompanyId) -> Self {
        Self { keys, company_id }
    }

    /// Normalizes periods, dropping unmapped concepts silently.
    #[must_use]
    pub fn normalize(&self, periods: &[FlatPeriod]) -> Vec<PeriodRecord> {
        self.normalize_with(periods, &mut SilentObserver)
    }

    /// Normalizes periods, reporting unmapped category concepts to `observer`.
    pub fn normalize_with(
        &self,
        periods: &[FlatPeriod],
        observer: &mut dyn MappingObserver,
    ) -> Vec<PeriodRecord> {
        periods
            .iter()
            .map(|period| self.normalize_period(period, observer))
            .collect()
    }

    fn normalize_period(
        &self,
        period: &FlatPeriod,
        observer: &mut dyn MappingObserver,
    ) -> PeriodRecord {
        let mut record = PeriodRecord::new(self.company_id, period.start_date(), period.end_date());

        for (source_key, field) in self.keys.entries() {
            let reported = match lookup_field(&period.fields, source_key) {
                Some(FieldValue::Categories(categories)) => Some(reduce_categories(categories)),
                Some(FieldValue::Scalar(scalar)) => json_amount(scalar).map(|a| (a, Vec::new())),
                None => None,
            };

            match field {
                CanonicalField::Category(key) => {
                    let (amount, items) = reported.unwrap_or_default();
                    *record.amounts.get_mut(*key) = amount;
                    *record.line_items.get_mut(*key) = items;
                }
                CanonicalField::Taxes => {
                    record.taxes = reported.map(|(amount, _)| amount);
                }
            }
        }

        for (name, value) in &period.fields {
            if matches!(value, FieldValue::Categories(_)) && !self.keys.contains(name) {
                debug!(field = %name, "Flat field has no canonical key");
                observer.on_gap(MappingGap::UnmappedField {
                    field: name.clone(),
                });
            }
        }

        record
    }
}

/// Sums every category's total but keeps only the first category's line items.
///
/// Later categories contribute to the amount and nothing else; that is how the
/// provider's documents have always been read.
fn reduce_categories(categories: &[FlatCategory]) -> (Decimal, Vec<LineItem>) {
    let total = categories
        .iter()
        .map(|category| json_amount(&category.value).unwrap_or_default())
        .fold(Decimal::ZERO, add_amounts);

    let items = categories
        .first()
        .map(|category| category.line_items.iter().map(to_line_item).collect())
        .unwrap_or_default();

    (total, items)
}

fn to_line_item(item: &FlatLineItem) -> LineItem {
    LineItem {
        key: snake_key(&item.name),
        original_name: Some(item.name.clone()),
        value: json_amount(&item.value).unwrap_or_default(),
        account_id: item.account_id.as_ref().and_then(json_id),
    }
}
