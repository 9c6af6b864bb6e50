//! Unit tests for category merging.

use finsync_shared::types::{CategoryId, CompanyId, ReportDate, ReportPeriodId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::MergeError;
use super::service::MergeService;
use super::types::{CompanyRef, PeriodRef, StoredCategory};
use crate::pipeline::PersistenceError;
use crate::ports::MockStatementStore;
use crate::schema::LineItem;

fn date(value: &str) -> ReportDate {
    ReportDate::parse(value).unwrap()
}

fn item(key: &str, value: Decimal) -> LineItem {
    LineItem {
        key: key.to_string(),
        original_name: Some(key.to_string()),
        value,
        account_id: None,
    }
}

fn stored(
    id: i64,
    name: &str,
    value: Decimal,
    company: (i64, &str),
    line_items: Vec<LineItem>,
) -> StoredCategory {
    let company_id = CompanyId::new(company.0);
    StoredCategory {
        id: CategoryId::new(id),
        name: name.to_string(),
        category_type: name.to_string(),
        value,
        line_items,
        period: PeriodRef {
            id: ReportPeriodId::new(id * 10),
            start_date: date("2023-01-01"),
            end_date: date("2023-01-31"),
            company_id,
        },
        company: CompanyRef {
            id: company_id,
            name: company.1.to_string(),
        },
    }
}

#[test]
fn test_merged_value_clamps_on_overflow() {
    let rows = vec![
        stored(1, "income", Decimal::MAX, (1, "Tree Holdings"), Vec::new()),
        stored(2, "income", dec!(1), (2, "Flat Trading"), Vec::new()),
    ];

    let merged = MergeService::merge(rows);

    assert_eq!(merged[0].value, Decimal::MAX);
    assert_eq!(merged[0].report_periods.len(), 2);
}

#[test]
fn test_same_named_categories_are_summed_and_concatenated() {
    let rows = vec![
        stored(1, "income", dec!(100), (1, "Tree Holdings"), vec![item("Consulting Fees", dec!(100))]),
        stored(2, "income", dec!(250), (2, "Flat Trading"), vec![
            item("product_a", dec!(150)),
            item("product_b", dec!(100)),
        ]),
    ];

    let merged = MergeService::merge(rows);

    assert_eq!(merged.len(), 1);
    let income = &merged[0];
    assert_eq!(income.id, "income");
    assert_eq!(income.name, "income");
    assert_eq!(income.value, dec!(350));
    assert_eq!(income.category_type, "income");
    let keys: Vec<&str> = income.line_items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["Consulting Fees", "product_a", "product_b"]);
    assert_eq!(income.report_periods.len(), 2);
    assert_eq!(income.companies.len(), 2);
}

#[test]
fn test_companies_are_deduplicated_by_id() {
    let rows = vec![
        stored(1, "expenses", dec!(10), (1, "Tree Holdings"), vec![]),
        stored(2, "expenses", dec!(20), (1, "Tree Holdings"), vec![]),
        stored(3, "expenses", dec!(30), (2, "Flat Trading"), vec![]),
    ];

    let merged = MergeService::merge(rows);

    let companies: Vec<i64> = merged[0]
        .companies
        .iter()
        .map(|c| c.id.into_inner())
        .collect();
    assert_eq!(companies, vec![1, 2]);
    assert_eq!(merged[0].report_periods.len(), 3);
    assert_eq!(merged[0].value, dec!(60));
}

#[test]
fn test_output_is_sorted_by_name() {
    let rows = vec![
        stored(1, "net_income", dec!(1), (1, "A"), vec![]),
        stored(2, "cogs", dec!(2), (1, "A"), vec![]),
        stored(3, "income", dec!(3), (1, "A"), vec![]),
        stored(4, "cogs", dec!(4), (2, "B"), vec![]),
    ];

    let merged = MergeService::merge(rows);

    let names: Vec<&str> = merged.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["cogs", "income", "net_income"]);
    assert_eq!(merged[0].value, dec!(6));
}

#[test]
fn test_id_is_derived_from_display_name() {
    let merged = MergeService::merge(vec![stored(1, "Other Income", dec!(5), (1, "A"), vec![])]);

    assert_eq!(merged[0].id, "other_income");
}

#[test]
fn test_empty_input_yields_empty_output() {
    assert!(MergeService::merge(Vec::new()).is_empty());
}

#[tokio::test]
async fn test_merge_by_date_range_queries_exact_bounds() {
    let mut store = MockStatementStore::new();
    store
        .expect_find_categories_by_period_bounds()
        .times(1)
        .returning(|start, end| {
            assert_eq!(start.to_string(), "2023-01-01");
            assert_eq!(end.to_string(), "2023-01-31");
            Ok(vec![
                stored(1, "income", dec!(100), (1, "Tree Holdings"), vec![]),
                stored(2, "income", dec!(250), (2, "Flat Trading"), vec![]),
            ])
        });

    let merged = MergeService::merge_by_date_range(&store, "2023-01-01", "2023-01-31")
        .await
        .unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].value, dec!(350));
}

#[tokio::test]
async fn test_malformed_date_is_rejected_before_store_lookup() {
    let mut store = MockStatementStore::new();
    store.expect_find_categories_by_period_bounds().never();

    let err = MergeService::merge_by_date_range(&store, "01-01-2023", "2023-01-31")
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::InvalidDate(_)));
    assert_eq!(
        err.to_string(),
        "invalid date '01-01-2023': expected YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_impossible_end_date_is_rejected() {
    let mut store = MockStatementStore::new();
    store.expect_find_categories_by_period_bounds().never();

    let err = MergeService::merge_by_date_range(&store, "2023-02-01", "2023-02-30")
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::InvalidDate(_)));
}

#[tokio::test]
async fn test_store_failure_maps_to_store_error() {
    let mut store = MockStatementStore::new();
    store
        .expect_find_categories_by_period_bounds()
        .returning(|_, _| Err(PersistenceError::Database("timeout".to_string())));

    let err = MergeService::merge_by_date_range(&store, "2023-01-01", "2023-01-31")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Category lookup failed: Database error: timeout"
    );
}
