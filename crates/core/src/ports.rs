//! Collaborator traits.
//!
//! The engine never opens a socket or a database connection itself; the api
//! and db crates plug implementations of these traits into
//! [`IngestionService`](crate::pipeline::IngestionService).

use std::sync::Arc;

use async_trait::async_trait;
use finsync_shared::types::ReportDate;
use serde_json::Value;

use crate::merge::StoredCategory;
use crate::pipeline::{EntityCounts, FetchError, PersistenceError};
use crate::schema::PeriodRecord;

/// Retrieves a raw provider document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatementFetcher: Send + Sync {
    /// Fetches the JSON document stored at `location`.
    async fn fetch(&self, location: &str) -> Result<Value, FetchError>;
}

/// Persists canonical records and answers category queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatementStore: Send + Sync {
    /// Saves one company's records in a single transaction.
    ///
    /// Nothing is written when any part of the batch fails.
    async fn save(
        &self,
        company_name: &str,
        records: &[PeriodRecord],
    ) -> Result<EntityCounts, PersistenceError>;

    /// Loads categories whose period has exactly these bounds.
    async fn find_categories_by_period_bounds(
        &self,
        start_date: ReportDate,
        end_date: ReportDate,
    ) -> Result<Vec<StoredCategory>, PersistenceError>;

    /// Counts stored companies, periods, categories and line items.
    async fn count_entities(&self) -> Result<EntityCounts, PersistenceError>;
}

#[async_trait]
impl<T> StatementFetcher for Arc<T>
where
    T: StatementFetcher + ?Sized,
{
    async fn fetch(&self, location: &str) -> Result<Value, FetchError> {
        (**self).fetch(location).await
    }
}

#[async_trait]
impl<T> StatementStore for Arc<T>
where
    T: StatementStore + ?Sized,
{
    async fn save(
        &self,
        company_name: &str,
        records: &[PeriodRecord],
    ) -> Result<EntityCounts, PersistenceError> {
        (**self).save(company_name, records).await
    }

    async fn find_categories_by_period_bounds(
        &self,
        start_date: ReportDate,
        end_date: ReportDate,
    ) -> Result<Vec<StoredCategory>, PersistenceError> {
        (**self)
            .find_categories_by_period_bounds(start_date, end_date)
            .await
    }

    async fn count_entities(&self) -> Result<EntityCounts, PersistenceError> {
        (**self).count_entities().await
    }
}
