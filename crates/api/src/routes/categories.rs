//! Merged category routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use finsync_core::merge::MergedCategory;
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories/merged", get(get_merged_categories))
}

/// Query parameters for the merged category view.
#[derive(Debug, Deserialize)]
pub struct MergedCategoriesQuery {
    /// Period start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Period end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// Merges categories of every period with exactly the requested bounds.
async fn get_merged_categories(
    State(state): State<AppState>,
    Query(query): Query<MergedCategoriesQuery>,
) -> Result<Json<Vec<MergedCategory>>, ApiError> {
    let start_date = query
        .start_date
        .ok_or_else(|| ApiError::validation("start_date is required"))?;
    let end_date = query
        .end_date
        .ok_or_else(|| ApiError::validation("end_date is required"))?;

    let merged = state
        .ingestion
        .merge_categories_by_date_range(&start_date, &end_date)
        .await?;
    Ok(Json(merged))
}
