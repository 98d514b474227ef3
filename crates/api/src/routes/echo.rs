//! Connectivity diagnostics endpoint.

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::{RawSubmission, SubmissionRejection};

#[derive(Serialize)]
pub struct EchoResponse {
    pub received: serde_json::Value,
}

/// POST /api/test — echoes the decoded body back as `{"received": ...}`.
#[tracing::instrument(skip_all)]
pub async fn echo(
    submission: Result<RawSubmission, SubmissionRejection>,
) -> Result<Json<EchoResponse>, ApiError> {
    let RawSubmission(submission) = submission
        .map_err(|rejection| ApiError::BadRequest(format!("Error parsing input: {rejection}")))?;

    Ok(Json(EchoResponse {
        received: submission.into_value(),
    }))
}
