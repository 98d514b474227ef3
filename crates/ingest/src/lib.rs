//! Ingestion layer for the telemetry sink.
//!
//! This crate provides:
//! - Decoding of raw request bodies (JSON or URL-encoded form)
//! - Schema validation producing field-level errors
//! - Client address resolution for audit logging
//! - `IngestService`, which validates, appends, and audits one event

pub mod client;
pub mod error;
pub mod service;
pub mod submission;
pub mod validator;

pub use client::ClientAddr;
pub use error::{ErrorKind, FieldError, IngestError, ValidationErrors};
pub use service::IngestService;
pub use submission::{DecodeError, Submission};
pub use validator::validate;
