//! Ingestion orchestrator.

use serde_json::Value;
use tracing::{info, warn};

use super::error::{NormalizeError, PersistenceError, PipelineError};
use super::types::{EntityCounts, IngestionConfig, ProcessingResult, SourceId, SourceSettings};
use crate::flat::{FlatDocument, FlatNormalizer, validate_periods};
use crate::merge::{MergeError, MergeService, MergedCategory};
use crate::ports::{StatementFetcher, StatementStore};
use crate::schema::{FLAT_KEYS, KeyMap, MappingGap, MappingObserver, PeriodRecord, TREE_KEYS};
use crate::tree::{TreeNormalizer, TreeReport};

/// Runs fetch, normalize and persist for each provider.
///
/// Stage failures never escape: they are turned into a failed
/// [`ProcessingResult`] for the source that raised them.
pub struct IngestionService<F, S> {
    fetcher: F,
    store: S,
    config: IngestionConfig,
    tree_keys: &'static KeyMap,
    flat_keys: &'static KeyMap,
}

impl<F, S> IngestionService<F, S>
where
    F: StatementFetcher,
    S: StatementStore,
{
    /// Creates a service using the built-in key-mapping tables.
    #[must_use]
    pub fn new(fetcher: F, store: S, config: IngestionConfig) -> Self {
        Self::with_key_maps(fetcher, store, config, &TREE_KEYS, &FLAT_KEYS)
    }

    /// Creates a service with custom key-mapping tables.
    #[must_use]
    pub fn with_key_maps(
        fetcher: F,
        store: S,
        config: IngestionConfig,
        tree_keys: &'static KeyMap,
        flat_keys: &'static KeyMap,
    ) -> Self {
        Self {
            fetcher,
            store,
            config,
            tree_keys,
            flat_keys,
        }
    }

    /// Returns the persistence collaborator.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the source settings.
    pub const fn config(&self) -> &IngestionConfig {
        &self.config
    }

    /// Fetches, normalizes and saves one source.
    ///
    /// The source either commits entirely or contributes nothing.
    pub async fn process_source(&self, source: SourceId) -> ProcessingResult {
        let settings = self.config.source(source);
        info!(%source, location = %settings.location, "Processing source");

        match self.run(source, settings).await {
            Ok(counts) => {
                info!(
                    %source,
                    companies = counts.companies,
                    report_periods = counts.report_periods,
                    categories = counts.categories,
                    line_items = counts.line_items,
                    "Source processed"
                );
                ProcessingResult::succeeded(format!("{source} data processed successfully"), counts)
            }
            Err(err) => {
                warn!(%source, stage = err.stage(), error = %err, "Source processing failed");
                ProcessingResult::failed(format!("Failed to process {source} data"), err.messages())
            }
        }
    }

    /// Processes every source one after another and combines the results.
    pub async fn process_all(&self) -> ProcessingResult {
        let mut results = Vec::with_capacity(SourceId::ALL.len());
        for source in SourceId::ALL {
            results.push(self.process_source(source).await);
        }
        ProcessingResult::combine(results)
    }

    /// Merges stored categories whose period has exactly these bounds.
    ///
    /// # Errors
    ///
    /// Returns `MergeError::InvalidDate` for a malformed bound, without
    /// querying the store.
    pub async fn merge_categories_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<MergedCategory>, MergeError> {
        MergeService::merge_by_date_range(&self.store, start_date, end_date).await
    }

    /// Counts everything currently stored.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` when the store cannot be queried.
    pub async fn statistics(&self) -> Result<EntityCounts, PersistenceError> {
        self.store.count_entities().await
    }

    /// Decodes and normalizes a raw document for `source`.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Normalize` when the document does not have the
    /// provider's shape and `PipelineError::Validation` when a flat document
    /// fails its structural checks.
    pub fn normalize(
        &self,
        source: SourceId,
        document: Value,
        observer: &mut dyn MappingObserver,
    ) -> Result<Vec<PeriodRecord>, PipelineError> {
        let company_id = self.config.source(source).company_id;
        let decode_error = |e: serde_json::Error| NormalizeError::Decode {
            provider: source,
            message: e.to_string(),
        };

        match source {
            SourceId::Tree => {
                let report: TreeReport = serde_json::from_value(document).map_err(decode_error)?;
                let normalizer =
                    TreeNormalizer::new(self.tree_keys, company_id, &self.config.default_group);
                Ok(normalizer.normalize_with(&report, observer))
            }
            SourceId::Flat => {
                let periods = serde_json::from_value::<FlatDocument>(document)
                    .map_err(decode_error)?
                    .into_periods();
                validate_periods(&periods)?;
                let normalizer = FlatNormalizer::new(self.flat_keys, company_id);
                Ok(normalizer.normalize_with(&periods, observer))
            }
        }
    }

    async fn run(
        &self,
        source: SourceId,
        settings: &SourceSettings,
    ) -> Result<EntityCounts, PipelineError> {
        let document = self.fetcher.fetch(&settings.location).await?;

        let mut gaps: Vec<MappingGap> = Vec::new();
        let records = self.normalize(source, document, &mut gaps)?;
        info!(%source, records = records.len(), gaps = gaps.len(), "Normalized source document");

        let counts = self.store.save(&settings.company_name, &records).await?;
        Ok(counts)
    }
}
