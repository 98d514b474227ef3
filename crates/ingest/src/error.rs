//! Ingestion error types.

use event_log::EventLogError;
use serde::Serialize;
use thiserror::Error;

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is absent.
    Missing,
    /// A string field holds another JSON type.
    StringType,
    /// A string field is empty or whitespace only.
    StringTooShort,
    /// The payload is not a JSON object.
    DictType,
    /// The body itself is not a JSON object.
    ModelAttributesType,
    /// A timestamp string could not be parsed.
    DatetimeParsing,
    /// A timestamp holds neither a string nor a number.
    DatetimeType,
}

impl ErrorKind {
    /// Human-readable reason.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Missing => "Field required",
            ErrorKind::StringType => "Input should be a valid string",
            ErrorKind::StringTooShort => "String should have at least 1 character",
            ErrorKind::DictType => "Input should be a valid dictionary",
            ErrorKind::ModelAttributesType => {
                "Input should be a valid dictionary or object to extract fields from"
            }
            ErrorKind::DatetimeParsing => "Input should be a valid datetime",
            ErrorKind::DatetimeType => "Input should be a valid datetime",
        }
    }
}

/// One rejected field, located by its path inside the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<&'static str>,
    pub msg: &'static str,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl FieldError {
    /// Error on a top-level body field.
    pub fn field(name: &'static str, kind: ErrorKind) -> Self {
        Self {
            loc: vec!["body", name],
            msg: kind.message(),
            kind,
        }
    }

    /// Error on the body as a whole.
    pub fn body(kind: ErrorKind) -> Self {
        Self {
            loc: vec!["body"],
            msg: kind.message(),
            kind,
        }
    }

    /// Returns the field name, or `None` for body-level errors.
    pub fn field_name(&self) -> Option<&'static str> {
        self.loc.get(1).copied()
    }
}

/// Every field-level failure found in one submission.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{} validation error(s): {}", .0.len(), summary(.0))]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the error reported for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field_name() == Some(field))
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while ingesting a submission.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The submission failed schema validation.
    #[error("Invalid event: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The event could not be appended to the log.
    #[error("Failed to persist event: {0}")]
    Persist(#[from] EventLogError),
}

/// Convenience type alias for ingestion results.
pub type Result<T> = std::result::Result<T, IngestError>;
