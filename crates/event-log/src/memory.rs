use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{EventLog, Result, TelemetryEvent};

/// In-memory event log implementation for testing.
///
/// Keeps appended events in insertion order and provides the same
/// interface as the file-backed log.
#[derive(Clone, Default)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<TelemetryEvent>>>,
}

impl InMemoryEventLog {
    /// Creates a new empty in-memory log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every appended event, oldest first.
    pub async fn events(&self) -> Vec<TelemetryEvent> {
        self.events.read().await.clone()
    }

    /// Returns the total number of events stored.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Clears all events.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(&self, event: &TelemetryEvent) -> Result<()> {
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
