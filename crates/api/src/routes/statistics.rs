//! Storage statistics route.

use axum::{Json, Router, extract::State, routing::get};
use finsync_core::pipeline::EntityCounts;

use crate::{AppState, error::ApiError};

/// Creates the statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/statistics", get(get_statistics))
}

async fn get_statistics(State(state): State<AppState>) -> Result<Json<EntityCounts>, ApiError> {
    let counts = state.ingestion.statistics().await?;
    Ok(Json(counts))
}
