//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use finsync_core::merge::MergeError;
use finsync_core::pipeline::PersistenceError;
use finsync_shared::AppError;
use serde_json::json;
use tracing::error;

/// Handler error rendered as `{ "error": code, "message": text }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Malformed caller input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// Unknown resource.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    fn message(&self) -> &str {
        match &self.0 {
            AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Database(m)
            | AppError::ExternalService(m)
            | AppError::Internal(m) => m,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<MergeError> for ApiError {
    fn from(err: MergeError) -> Self {
        match err {
            MergeError::InvalidDate(e) => Self::validation(e.to_string()),
            MergeError::Store(message) => Self(AppError::Database(message)),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = json!({
            "error": self.0.error_code().to_ascii_lowercase(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}
