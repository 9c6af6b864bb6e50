//! HTTP API layer with Axum routes and the statement fetcher.
//!
//! This crate provides:
//! - REST API routes for processing sources and querying merged categories
//! - The reqwest-backed [`HttpFetcher`]
//! - JSON error responses

pub mod error;
pub mod fetcher;
pub mod routes;

pub use error::ApiError;
pub use fetcher::HttpFetcher;

use axum::Router;
use finsync_core::pipeline::{IngestionConfig, IngestionService, SourceSettings};
use finsync_core::ports::{StatementFetcher, StatementStore};
use finsync_shared::AppConfig;
use finsync_shared::config::SourceConfig;
use finsync_shared::types::CompanyId;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Fetch collaborator shared across handlers.
pub type SharedFetcher = Arc<dyn StatementFetcher>;

/// Persistence collaborator shared across handlers.
pub type SharedStore = Arc<dyn StatementStore>;

/// Orchestrator type served by the API.
pub type Ingestion = IngestionService<SharedFetcher, SharedStore>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ingestion orchestrator.
    pub ingestion: Arc<Ingestion>,
}

impl AppState {
    /// Builds the state from its collaborators.
    #[must_use]
    pub fn new(fetcher: SharedFetcher, store: SharedStore, config: IngestionConfig) -> Self {
        Self {
            ingestion: Arc::new(IngestionService::new(fetcher, store, config)),
        }
    }
}

/// Maps loaded application configuration onto orchestrator settings.
#[must_use]
pub fn ingestion_config(config: &AppConfig) -> IngestionConfig {
    let settings = |source: &SourceConfig| SourceSettings {
        location: source.location.clone(),
        company_name: source.company_name.clone(),
        company_id: CompanyId::new(source.company_id),
    };

    IngestionConfig {
        tree: settings(&config.sources.tree),
        flat: settings(&config.sources.flat),
        default_group: config.normalization.default_group.clone(),
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
