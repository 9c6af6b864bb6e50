//! Property-based tests for category merging.

use finsync_shared::types::{CategoryId, CompanyId, ReportDate, ReportPeriodId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::MergeService;
use super::types::{CompanyRef, PeriodRef, StoredCategory};
use crate::schema::LineItem;

const NAMES: [&str; 4] = ["income", "cogs", "expenses", "net_income"];

/// Strategy for one stored row: name index, company, cents, line-item cents.
fn row_strategy() -> impl Strategy<Value = (usize, i64, i64, Vec<i64>)> {
    (
        0..NAMES.len(),
        1i64..4,
        -10_000_000i64..10_000_000i64,
        prop::collection::vec(-100_000i64..100_000i64, 0..4),
    )
}

fn build(rows: &[(usize, i64, i64, Vec<i64>)]) -> Vec<StoredCategory> {
    let day = ReportDate::parse("2023-01-01").unwrap();
    rows.iter()
        .enumerate()
        .map(|(i, (name, company, cents, items))| {
            let id = i64::try_from(i).unwrap() + 1;
            StoredCategory {
                id: CategoryId::new(id),
                name: NAMES[*name].to_string(),
                category_type: NAMES[*name].to_string(),
                value: Decimal::new(*cents, 2),
                line_items: items
                    .iter()
                    .map(|c| LineItem {
                        key: format!("item_{id}"),
                        original_name: None,
                        value: Decimal::new(*c, 2),
                        account_id: None,
                    })
                    .collect(),
                period: PeriodRef {
                    id: ReportPeriodId::new(id),
                    start_date: day,
                    end_date: day,
                    company_id: CompanyId::new(*company),
                },
                company: CompanyRef {
                    id: CompanyId::new(*company),
                    name: format!("Company {company}"),
                },
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Each merged value equals the sum of its raw rows, and line-item counts add up.
    #[test]
    fn prop_merge_preserves_sums_and_line_item_counts(
        rows in prop::collection::vec(row_strategy(), 0..20)
    ) {
        let raw = build(&rows);
        let merged = MergeService::merge(raw.clone());

        for category in &merged {
            let matching: Vec<&StoredCategory> =
                raw.iter().filter(|r| r.name == category.name).collect();
            let value: Decimal = matching.iter().map(|r| r.value).sum();
            let items: usize = matching.iter().map(|r| r.line_items.len()).sum();

            prop_assert_eq!(category.value, value);
            prop_assert_eq!(category.line_items.len(), items);
            prop_assert_eq!(category.report_periods.len(), matching.len());
        }

        let total: Decimal = raw.iter().map(|r| r.value).sum();
        let merged_total: Decimal = merged.iter().map(|m| m.value).sum();
        prop_assert_eq!(merged_total, total);
    }

    /// Names are unique and sorted; companies are unique within a category.
    #[test]
    fn prop_merge_output_is_sorted_and_deduplicated(
        rows in prop::collection::vec(row_strategy(), 0..20)
    ) {
        let merged = MergeService::merge(build(&rows));

        for pair in merged.windows(2) {
            prop_assert!(pair[0].name < pair[1].name);
        }
        for category in &merged {
            let mut ids: Vec<i64> = category.companies.iter().map(|c| c.id.into_inner()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
        }
    }
}
