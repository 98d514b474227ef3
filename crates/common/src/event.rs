use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Free-form event payload. Always a JSON object.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A single telemetry event as accepted from a client and persisted to the log.
///
/// Events are immutable once constructed; the sink never updates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Identifier of the originating session.
    pub session_id: String,

    /// When the event happened, or when it was received if the client sent none.
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,

    /// Free-form event kind (e.g., "player_jump").
    pub event_type: String,

    /// Event-specific data.
    #[serde(default)]
    pub payload: Payload,
}

impl TelemetryEvent {
    /// Creates an event with an empty payload.
    pub fn new(
        session_id: impl Into<String>,
        event_type: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp,
            event_type: event_type.into(),
            payload: Payload::new(),
        }
    }

    /// Replaces the payload.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Returns the timestamp in its persisted form (`...Z`).
    pub fn timestamp_iso8601(&self) -> String {
        iso8601::format(&self.timestamp)
    }

    /// Serializes the event as one newline-terminated JSON line.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// ISO-8601 timestamps with an explicit `Z` designator.
pub mod iso8601 {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn format(timestamp: &DateTime<Utc>) -> String {
        timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(timestamp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
