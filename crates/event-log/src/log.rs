use async_trait::async_trait;

use crate::{Result, TelemetryEvent};

/// Core trait for event log implementations.
///
/// A log only ever grows: there is no read-back, deduplication, or
/// compaction. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Appends one event as a single record.
    ///
    /// An append is atomic with respect to other appends on the same log,
    /// including appends from other processes. Failures are returned to the
    /// caller as-is; nothing is retried or buffered.
    async fn append(&self, event: &TelemetryEvent) -> Result<()>;
}
