//! Append-only event log for telemetry events.
//!
//! The file-backed log writes one JSON object per line and serializes
//! writers across threads and OS processes with an advisory lock on a
//! sibling `.lock` file.

pub mod config;
pub mod error;
pub mod file;
pub mod log;
pub mod memory;

pub use common::TelemetryEvent;
pub use config::EventLogConfig;
pub use error::{EventLogError, Result};
pub use file::FileEventLog;
pub use log::EventLog;
pub use memory::InMemoryEventLog;
