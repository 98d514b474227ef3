//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ingest::{IngestError, ValidationErrors};

/// API-level error type that maps to HTTP responses.
///
/// Every variant renders as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// The body could not be read or decoded.
    BadRequest(String),
    /// The body decoded but failed schema validation.
    Invalid(ValidationErrors),
    /// The event could not be written to the log. The cause has already
    /// been logged by the ingest service.
    Persistence,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::Value::from(msg)),
            ApiError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::to_value(&errors).unwrap_or_default(),
            ),
            ApiError::Persistence => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::Value::from("Failed to persist event"),
            ),
        };

        let body = serde_json::json!({ "detail": detail });
        (status, axum::Json(body)).into_response()
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Invalid(errors) => ApiError::Invalid(errors),
            IngestError::Persist(_) => ApiError::Persistence,
        }
    }
}
