//! Schema validation for telemetry submissions.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use common::{Payload, TelemetryEvent};
use serde_json::Value;

use crate::error::{ErrorKind, FieldError, ValidationErrors};
use crate::submission::Submission;

/// Unix timestamps above this magnitude are read as milliseconds.
const MILLIS_THRESHOLD: f64 = 2e10;

/// Validates a submission and builds the event it describes.
///
/// `received_at` fills in a missing or falsy timestamp. Every failing field
/// is reported, not just the first one. Validation has no side effects.
pub fn validate(
    submission: Submission,
    received_at: DateTime<Utc>,
) -> Result<TelemetryEvent, ValidationErrors> {
    match submission {
        Submission::Json(value) => validate_json(value, received_at),
        Submission::Form(fields) => validate_form(fields, received_at),
    }
}

fn validate_json(
    value: Value,
    received_at: DateTime<Utc>,
) -> Result<TelemetryEvent, ValidationErrors> {
    let Value::Object(mut body) = value else {
        return Err(ValidationErrors(vec![FieldError::body(
            ErrorKind::ModelAttributesType,
        )]));
    };

    let mut errors = Vec::new();

    let session_id = collect(
        &mut errors,
        "session_id",
        required_string(body.remove("session_id")),
    );
    let timestamp = collect(
        &mut errors,
        "timestamp",
        json_timestamp(body.remove("timestamp"), received_at),
    );
    let event_type = collect(
        &mut errors,
        "event_type",
        required_string(body.remove("event_type")),
    );
    let payload = collect(&mut errors, "payload", json_payload(body.remove("payload")));

    finish(errors, session_id, timestamp, event_type, payload)
}

fn validate_form(
    fields: Vec<(String, String)>,
    received_at: DateTime<Utc>,
) -> Result<TelemetryEvent, ValidationErrors> {
    // Repeated names: last one wins.
    let mut fields: HashMap<String, String> = fields.into_iter().collect();
    let mut errors = Vec::new();

    let session_id = collect(
        &mut errors,
        "session_id",
        required_string(fields.remove("session_id").map(Value::String)),
    );
    let timestamp = collect(
        &mut errors,
        "timestamp",
        json_timestamp(fields.remove("timestamp").map(Value::String), received_at),
    );
    let event_type = collect(
        &mut errors,
        "event_type",
        required_string(fields.remove("event_type").map(Value::String)),
    );
    let payload = collect(&mut errors, "payload", form_payload(fields.remove("payload")));

    finish(errors, session_id, timestamp, event_type, payload)
}

fn collect<T>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    result: Result<T, ErrorKind>,
) -> Option<T> {
    result
        .map_err(|kind| errors.push(FieldError::field(field, kind)))
        .ok()
}

fn finish(
    errors: Vec<FieldError>,
    session_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    event_type: Option<String>,
    payload: Option<Payload>,
) -> Result<TelemetryEvent, ValidationErrors> {
    match (session_id, timestamp, event_type, payload) {
        (Some(session_id), Some(timestamp), Some(event_type), Some(payload))
            if errors.is_empty() =>
        {
            Ok(TelemetryEvent {
                session_id,
                timestamp,
                event_type,
                payload,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

fn required_string(value: Option<Value>) -> Result<String, ErrorKind> {
    match value {
        None => Err(ErrorKind::Missing),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ErrorKind::StringTooShort),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ErrorKind::StringType),
    }
}

fn json_timestamp(
    value: Option<Value>,
    received_at: DateTime<Utc>,
) -> Result<DateTime<Utc>, ErrorKind> {
    match value {
        None => Ok(received_at),
        Some(value) if is_falsy(&value) => Ok(received_at),
        Some(Value::String(s)) => parse_timestamp(&s).ok_or(ErrorKind::DatetimeParsing),
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(from_unix)
            .ok_or(ErrorKind::DatetimeParsing),
        Some(_) => Err(ErrorKind::DatetimeType),
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` all count as "no timestamp given".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn json_payload(value: Option<Value>) -> Result<Payload, ErrorKind> {
    match value {
        None => Ok(Payload::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(ErrorKind::DictType),
    }
}

/// Form payloads arrive as JSON text. Text that is not JSON at all falls
/// back to an empty object; valid JSON that is not an object is rejected.
fn form_payload(raw: Option<String>) -> Result<Payload, ErrorKind> {
    let Some(raw) = raw else {
        return Ok(Payload::new());
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ErrorKind::DictType),
        Err(_) => Ok(Payload::new()),
    }
}

/// Parses RFC 3339 (any offset) or a naive date/time taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn from_unix(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    let seconds = if value.abs() > MILLIS_THRESHOLD {
        value / 1000.0
    } else {
        value
    };
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}
