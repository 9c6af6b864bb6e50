//! Unit tests for the ingestion orchestrator.

use finsync_shared::types::CompanyId;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use super::error::{FetchError, PersistenceError};
use super::service::IngestionService;
use super::types::{EntityCounts, IngestionConfig, ProcessingResult, SourceId, SourceSettings};
use crate::ports::{MockStatementFetcher, MockStatementStore};
use crate::schema::{CategoryKey, PeriodRecord};

// ============================================================================
// Fixtures
// ============================================================================

const TREE_LOCATION: &str = "https://tree.example.test/reports/pnl";
const FLAT_LOCATION: &str = "fixtures/flat.json";

fn config() -> IngestionConfig {
    IngestionConfig {
        tree: SourceSettings {
            location: TREE_LOCATION.to_string(),
            company_name: "Tree Holdings".to_string(),
            company_id: CompanyId::new(1),
        },
        flat: SourceSettings {
            location: FLAT_LOCATION.to_string(),
            company_name: "Flat Trading".to_string(),
            company_id: CompanyId::new(2),
        },
        default_group: "Income".to_string(),
    }
}

fn tree_document() -> Value {
    json!({
        "Columns": { "Column": [
            { "ColTitle": "", "ColType": "Account" },
            { "ColTitle": "Jan", "ColType": "Money", "MetaData": [
                { "Name": "StartDate", "Value": "2023-01-01" },
                { "Name": "EndDate", "Value": "2023-01-31" }
            ] },
            { "ColTitle": "Feb", "ColType": "Money", "MetaData": [
                { "Name": "StartDate", "Value": "2023-02-01" },
                { "Name": "EndDate", "Value": "2023-02-28" }
            ] }
        ] },
        "Rows": { "Row": [{
            "group": "Income",
            "Rows": { "Row": [{ "ColData": [
                { "value": "Consulting Fees", "id": "7" }, { "value": "100" }, { "value": "150" }
            ] }] }
        }] }
    })
}

fn flat_document() -> Value {
    json!({ "data": [{
        "period_start": "2023-01-01",
        "period_end": "2023-01-31",
        "company_id": 9,
        "revenue": [{ "name": "Sales", "value": 1000, "line_items": [
            { "name": "Product A", "value": 600 },
            { "name": "Product B", "value": 400 }
        ] }],
        "net_profit": 250
    }] })
}

/// Counts a save would report for `records`.
fn counts_for(records: &[PeriodRecord]) -> EntityCounts {
    EntityCounts {
        companies: 1,
        report_periods: records.len() as u64,
        categories: (records.len() * CategoryKey::ALL.len()) as u64,
        line_items: records.iter().map(PeriodRecord::line_item_count).sum::<usize>() as u64,
    }
}

fn fetcher_returning(location: &'static str, document: Value) -> MockStatementFetcher {
    let mut fetcher = MockStatementFetcher::new();
    fetcher
        .expect_fetch()
        .times(1)
        .returning(move |requested| {
            assert_eq!(requested, location);
            Ok(document.clone())
        });
    fetcher
}

fn store_counting() -> MockStatementStore {
    let mut store = MockStatementStore::new();
    store
        .expect_save()
        .returning(|_, records| Ok(counts_for(records)));
    store
}

// ============================================================================
// process_source
// ============================================================================

#[tokio::test]
async fn test_process_tree_source_saves_normalized_records() {
    let fetcher = fetcher_returning(TREE_LOCATION, tree_document());
    let mut store = MockStatementStore::new();
    store
        .expect_save()
        .times(1)
        .returning(|company_name, records| {
            assert_eq!(company_name, "Tree Holdings");
            assert_eq!(records.len(), 2);
            assert!(records.iter().all(|r| r.company_id == CompanyId::new(1)));
            assert_eq!(records[1].line_items.income[0].value, dec!(150));
            Ok(counts_for(records))
        });
    let service = IngestionService::new(fetcher, store, config());

    let result = service.process_source(SourceId::Tree).await;

    assert!(result.success);
    assert_eq!(result.message, "tree data processed successfully");
    assert_eq!(
        result.results,
        Some(EntityCounts {
            companies: 1,
            report_periods: 2,
            categories: 18,
            line_items: 2,
        })
    );
    assert_eq!(result.errors, None);
}

#[tokio::test]
async fn test_process_flat_source_stamps_configured_company() {
    let fetcher = fetcher_returning(FLAT_LOCATION, flat_document());
    let mut store = MockStatementStore::new();
    store
        .expect_save()
        .times(1)
        .returning(|company_name, records| {
            assert_eq!(company_name, "Flat Trading");
            assert_eq!(records[0].company_id, CompanyId::new(2));
            assert_eq!(records[0].amount(CategoryKey::Income), dec!(1000));
            assert_eq!(records[0].amount(CategoryKey::NetIncome), dec!(250));
            Ok(counts_for(records))
        });
    let service = IngestionService::new(fetcher, store, config());

    let result = service.process_source(SourceId::Flat).await;

    assert!(result.success);
    assert_eq!(result.results.map(|c| c.line_items), Some(2));
}

#[tokio::test]
async fn test_fetch_failure_becomes_failed_result() {
    let mut fetcher = MockStatementFetcher::new();
    fetcher.expect_fetch().returning(|location| {
        Err(FetchError::Status {
            location: location.to_string(),
            status: 503,
        })
    });
    let mut store = MockStatementStore::new();
    store.expect_save().never();
    let service = IngestionService::new(fetcher, store, config());

    let result = service.process_source(SourceId::Tree).await;

    assert!(!result.success);
    assert_eq!(result.message, "Failed to process tree data");
    assert_eq!(result.results, None);
    assert_eq!(
        result.errors,
        Some(vec![format!("{TREE_LOCATION} answered with status 503")])
    );
}

#[tokio::test]
async fn test_flat_validation_failure_skips_save_and_lists_issues() {
    let document = json!([
        { "period_start": "2023-01-01", "period_end": "2023-01-31", "company_id": 1 },
        { "period_end": "2023-02-28", "company_id": "two" }
    ]);
    let fetcher = fetcher_returning(FLAT_LOCATION, document);
    let mut store = MockStatementStore::new();
    store.expect_save().never();
    let service = IngestionService::new(fetcher, store, config());

    let result = service.process_source(SourceId::Flat).await;

    assert!(!result.success);
    assert_eq!(
        result.errors,
        Some(vec![
            "record 1: missing period_start".to_string(),
            "record 1: company_id is not numeric".to_string(),
        ])
    );
}

#[tokio::test]
async fn test_undecodable_document_fails_source() {
    let fetcher = fetcher_returning(TREE_LOCATION, json!(["not", "a", "report"]));
    let mut store = MockStatementStore::new();
    store.expect_save().never();
    let service = IngestionService::new(fetcher, store, config());

    let result = service.process_source(SourceId::Tree).await;

    assert!(!result.success);
    let errors = result.errors.unwrap_or_default();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("tree document could not be decoded"));
}

#[tokio::test]
async fn test_persistence_failure_reports_rollback() {
    let fetcher = fetcher_returning(TREE_LOCATION, tree_document());
    let mut store = MockStatementStore::new();
    store
        .expect_save()
        .times(1)
        .returning(|_, _| Err(PersistenceError::Database("unique violation".to_string())));
    let service = IngestionService::new(fetcher, store, config());

    let result = service.process_source(SourceId::Tree).await;

    assert!(!result.success);
    assert_eq!(
        result.errors,
        Some(vec!["Database error: unique violation".to_string()])
    );
}

// ============================================================================
// process_all
// ============================================================================

#[tokio::test]
async fn test_process_all_runs_both_sources_and_adds_counts() {
    let mut fetcher = MockStatementFetcher::new();
    fetcher.expect_fetch().times(2).returning(|location| {
        if location == TREE_LOCATION {
            Ok(tree_document())
        } else {
            Ok(flat_document())
        }
    });
    let service = IngestionService::new(fetcher, store_counting(), config());

    let result = service.process_all().await;

    assert!(result.success);
    assert_eq!(result.message, "All sources processed successfully");
    assert_eq!(
        result.results,
        Some(EntityCounts {
            companies: 2,
            report_periods: 3,
            categories: 27,
            line_items: 4,
        })
    );
    assert_eq!(result.errors, None);
}

#[tokio::test]
async fn test_process_all_keeps_going_after_one_source_fails() {
    let mut fetcher = MockStatementFetcher::new();
    fetcher.expect_fetch().times(2).returning(|location| {
        if location == TREE_LOCATION {
            Err(FetchError::Request {
                location: location.to_string(),
                message: "connection refused".to_string(),
            })
        } else {
            Ok(flat_document())
        }
    });
    let service = IngestionService::new(fetcher, store_counting(), config());

    let result = service.process_all().await;

    assert!(!result.success);
    assert_eq!(result.message, "One or more sources failed to process");
    assert_eq!(result.results.map(|c| c.report_periods), Some(1));
    assert_eq!(
        result.errors,
        Some(vec![format!(
            "Request to {TREE_LOCATION} failed: connection refused"
        )])
    );
}

#[test]
fn test_combine_ands_success_and_concatenates_errors() {
    let ok = ProcessingResult::succeeded(
        "tree ok",
        EntityCounts {
            companies: 1,
            report_periods: 2,
            categories: 18,
            line_items: 5,
        },
    );
    let first_failure = ProcessingResult::failed("flat failed", vec!["a".into(), "b".into()]);
    let second_failure = ProcessingResult::failed("flat failed again", vec!["c".into()]);

    let combined = ProcessingResult::combine(vec![ok.clone(), first_failure, second_failure]);

    assert!(!combined.success);
    assert_eq!(combined.results, ok.results);
    assert_eq!(
        combined.errors,
        Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
}

#[test]
fn test_processing_result_omits_empty_fields_when_serialized() {
    let value = serde_json::to_value(ProcessingResult::failed("x", vec!["e".into()])).unwrap();

    assert_eq!(value, json!({ "success": false, "message": "x", "errors": ["e"] }));
}

#[test]
fn test_source_id_parses_lowercase_names_only() {
    assert_eq!("tree".parse::<SourceId>(), Ok(SourceId::Tree));
    assert_eq!("flat".parse::<SourceId>(), Ok(SourceId::Flat));
    assert!("Tree".parse::<SourceId>().is_err());
    assert!("quickbooks".parse::<SourceId>().is_err());
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_statistics_delegates_to_store() {
    let mut store = MockStatementStore::new();
    store.expect_count_entities().times(1).returning(|| {
        Ok(EntityCounts {
            companies: 2,
            report_periods: 14,
            categories: 126,
            line_items: 310,
        })
    });
    let service = IngestionService::new(MockStatementFetcher::new(), store, config());

    let counts = service.statistics().await.unwrap();

    assert_eq!(counts.line_items, 310);
}
