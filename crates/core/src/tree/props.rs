//! Property-based tests for the tree normalizer.

use finsync_shared::types::CompanyId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use super::normalizer::TreeNormalizer;
use super::types::TreeReport;
use crate::schema::TREE_KEYS;

/// Strategy for a column: `true` means it carries both dates.
fn column_flags() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..8)
}

/// Strategy for cell amounts in cents.
fn row_values(width: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, width)
}

fn build_report(flags: &[bool], rows: &[Vec<i64>]) -> TreeReport {
    let mut columns = vec![json!({ "ColType": "Account" })];
    for (i, dated) in flags.iter().enumerate() {
        let day = i + 1;
        let meta = if *dated {
            json!([
                { "Name": "StartDate", "Value": format!("2023-01-{day:02}") },
                { "Name": "EndDate", "Value": format!("2023-01-{day:02}") }
            ])
        } else {
            json!([{ "Name": "EndDate", "Value": format!("2023-01-{day:02}") }])
        };
        columns.push(json!({ "ColType": "Money", "MetaData": meta }));
    }

    let data_rows: Vec<Value> = rows
        .iter()
        .enumerate()
        .map(|(i, values)| {
            let mut cells = vec![json!({ "value": format!("Item {i}") })];
            cells.extend(
                values
                    .iter()
                    .map(|cents| json!({ "value": Decimal::new(*cents, 2).to_string() })),
            );
            json!({ "ColData": cells })
        })
        .collect();

    serde_json::from_value(json!({
        "Columns": { "Column": columns },
        "Rows": { "Row": [{ "group": "Expenses", "Rows": { "Row": data_rows } }] }
    }))
    .expect("generated report should decode")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// One record per fully dated money column, never a partial record.
    #[test]
    fn prop_record_count_matches_dated_columns(flags in column_flags()) {
        let report = build_report(&flags, &[]);
        let normalizer = TreeNormalizer::new(&TREE_KEYS, CompanyId::new(1), "Income");

        let records = normalizer.normalize(&report);

        prop_assert_eq!(records.len(), flags.iter().filter(|f| **f).count());
        for record in &records {
            prop_assert!(!record.start_date.is_empty());
            prop_assert!(!record.end_date.is_empty());
        }
    }

    /// Each mapped normal row yields exactly one line item per period, carrying
    /// the value from that period's own column.
    #[test]
    fn prop_line_items_follow_column_alignment(
        (flags, rows) in column_flags().prop_flat_map(|flags| {
            let width = flags.len();
            (Just(flags), prop::collection::vec(row_values(width), 0..6))
        })
    ) {
        let report = build_report(&flags, &rows);
        let normalizer = TreeNormalizer::new(&TREE_KEYS, CompanyId::new(1), "Income");

        let records = normalizer.normalize(&report);
        let dated: Vec<usize> = flags
            .iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(i, _)| i)
            .collect();

        for (record, column) in records.iter().zip(&dated) {
            prop_assert_eq!(record.line_items.expenses.len(), rows.len());
            prop_assert_eq!(record.line_item_count(), rows.len());
            for (item, values) in record.line_items.expenses.iter().zip(&rows) {
                prop_assert_eq!(item.value, Decimal::new(values[*column], 2));
            }
        }
    }
}
