//! Ingestion service: validate, append, audit.

use chrono::Utc;
use common::TelemetryEvent;
use event_log::EventLog;

use crate::client::ClientAddr;
use crate::error::{IngestError, Result};
use crate::submission::Submission;
use crate::validator::validate;

/// Service that turns submissions into persisted telemetry events.
///
/// Holds the event log it appends to; the log is shared read-only across
/// concurrent requests.
pub struct IngestService<L: EventLog> {
    log: L,
}

impl<L: EventLog> IngestService<L> {
    /// Creates a new ingestion service writing to `log`.
    pub fn new(log: L) -> Self {
        Self { log }
    }

    /// Returns a reference to the underlying event log.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Validates and persists one submission.
    ///
    /// The receipt time is taken before validation, so a defaulted timestamp
    /// reflects when the request arrived rather than when it was written.
    /// Invalid submissions never reach the log. Persistence failures are
    /// returned unchanged; nothing is retried.
    #[tracing::instrument(skip(self, submission, client), fields(client_ip = %client))]
    pub async fn ingest(
        &self,
        submission: Submission,
        client: &ClientAddr,
    ) -> Result<TelemetryEvent> {
        let received_at = Utc::now();

        let event = validate(submission, received_at).map_err(|errors| {
            metrics::counter!("telemetry_events_rejected_total").increment(1);
            tracing::debug!(%errors, "rejected telemetry event");
            IngestError::Invalid(errors)
        })?;

        if let Err(err) = self.log.append(&event).await {
            metrics::counter!("telemetry_persist_failures_total").increment(1);
            tracing::error!(
                error = ?err,
                session_id = %event.session_id,
                event_type = %event.event_type,
                "failed to persist event"
            );
            return Err(IngestError::Persist(err));
        }

        metrics::counter!("telemetry_events_accepted_total").increment(1);
        tracing::info!(
            target: "telemetry::audit",
            received_at = %common::event::iso8601::format(&received_at),
            client_ip = %client,
            session_id = %event.session_id,
            event_type = %event.event_type,
            "telemetry event accepted"
        );

        Ok(event)
    }
}
