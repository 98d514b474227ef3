//! Raw request bodies before validation.

use serde_json::Value;
use thiserror::Error;

/// A decoded but not yet validated request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// `application/json` body, any JSON value.
    Json(Value),
    /// URL-encoded form fields in the order they were sent.
    Form(Vec<(String, String)>),
}

/// The body could not be decoded at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed JSON body: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Malformed form body: {0}")]
    MalformedForm(#[source] serde_urlencoded::de::Error),
}

impl Submission {
    /// Decodes `body` according to `content_type`.
    ///
    /// Anything that does not declare `application/json` is read as a
    /// URL-encoded form.
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Result<Self, DecodeError> {
        if is_json(content_type) {
            serde_json::from_slice(body)
                .map(Submission::Json)
                .map_err(DecodeError::MalformedJson)
        } else {
            serde_urlencoded::from_bytes(body)
                .map(Submission::Form)
                .map_err(DecodeError::MalformedForm)
        }
    }

    /// Converts the submission into a plain JSON value for echoing back.
    ///
    /// Form fields become a JSON object of strings; repeated names keep
    /// the last value.
    pub fn into_value(self) -> Value {
        match self {
            Submission::Json(value) => value,
            Submission::Form(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ),
        }
    }
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.trim_start().starts_with("application/json"))
}
