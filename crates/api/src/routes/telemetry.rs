//! Telemetry ingestion endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use event_log::EventLog;
use ingest::{DecodeError, IngestService};
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::{ClientIp, RawSubmission, SubmissionRejection};

/// Shared application state accessible from all handlers.
pub struct AppState<L: EventLog> {
    pub ingest: IngestService<L>,
}

impl<L: EventLog> AppState<L> {
    pub fn new(log: L) -> Self {
        Self {
            ingest: IngestService::new(log),
        }
    }
}

#[derive(Serialize)]
pub struct AcceptedResponse {
    pub status: &'static str,
}

/// POST /api/telemetry — validate one event and append it to the log.
#[tracing::instrument(skip_all)]
pub async fn receive<L: EventLog + 'static>(
    State(state): State<Arc<AppState<L>>>,
    client: ClientIp,
    submission: Result<RawSubmission, SubmissionRejection>,
) -> Result<(StatusCode, Json<AcceptedResponse>), ApiError> {
    let RawSubmission(submission) = submission.map_err(|rejection| match rejection {
        SubmissionRejection::Decode(DecodeError::MalformedJson(_)) => {
            ApiError::BadRequest("Malformed JSON body.".to_string())
        }
        other => ApiError::BadRequest(other.to_string()),
    })?;

    state.ingest.ingest(submission, &client.0).await?;

    Ok((
        StatusCode::CREATED,
        Json(AcceptedResponse { status: "accepted" }),
    ))
}
