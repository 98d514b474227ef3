//! Shared types for the telemetry sink.

pub mod event;

pub use event::{Payload, TelemetryEvent};
