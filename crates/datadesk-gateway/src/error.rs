//! API error type, mapped onto the wire contract in one place.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use datadesk_core::DataDeskError;

/// What a request handler can fail with.
///
/// Validation failures keep the flat 400 shape `{"error": msg}` that admin
/// clients already check for; upstream and internal failures reply 500 with
/// `{"success": false, "error": msg}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body is missing a required field.
    #[error("{0}")]
    Validation(String),
    /// The LLM provider call failed (transport, HTTP status, or bad payload).
    #[error("{0}")]
    Upstream(String),
    /// Anything else: storage, serialization, config.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": msg})),
            )
                .into_response(),
            ApiError::Upstream(msg) | ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"success": false, "error": msg})),
            )
                .into_response(),
        }
    }
}

impl From<DataDeskError> for ApiError {
    fn from(err: DataDeskError) -> Self {
        match err {
            DataDeskError::Validation(msg) => ApiError::Validation(msg),
            DataDeskError::Http(_)
            | DataDeskError::Provider(_)
            | DataDeskError::ApiKeyMissing(_) => ApiError::Upstream(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
