//! Source processing routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use finsync_core::pipeline::{ProcessingResult, SourceId};

use crate::{AppState, error::ApiError};

/// Creates the source processing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sources/process", post(process_all))
        .route("/sources/{source}/process", post(process_source))
}

/// Processes one source: `tree` or `flat`.
async fn process_source(
    State(state): State<AppState>,
    Path(source): Path<String>,
) -> Result<(StatusCode, Json<ProcessingResult>), ApiError> {
    let source: SourceId = source.parse().map_err(ApiError::not_found)?;

    let result = state.ingestion.process_source(source).await;
    Ok(result_response(result))
}

/// Processes both sources one after another.
async fn process_all(State(state): State<AppState>) -> (StatusCode, Json<ProcessingResult>) {
    let result = state.ingestion.process_all().await;
    result_response(result)
}

/// 200 when every source committed, 502 otherwise; the body is always the result.
fn result_response(result: ProcessingResult) -> (StatusCode, Json<ProcessingResult>) {
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(result))
}
