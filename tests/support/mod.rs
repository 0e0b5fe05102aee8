//! Store doubles for exercising round trip failure paths

use account_events::application::{
    AppendResult, EventStore, ExpectedRevision, InMemoryEventStore, ReadOptions, RecordedEvent,
};
use account_events::domain::{EventEnvelope, StreamName};
use account_events::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// How a [`FaultyStore`] damages what it hands back
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    /// Re-encode one payload with different whitespace
    ReformatPayload { index: usize },
    /// Drop the last event of every read
    DropLast,
    /// Swap the type tag of one event
    RenameType { index: usize },
}

/// Wraps an in-memory store and corrupts reads
pub struct FaultyStore {
    inner: InMemoryEventStore,
    fault: Fault,
}

impl FaultyStore {
    pub fn new(fault: Fault) -> Self {
        Self {
            inner: InMemoryEventStore::new(),
            fault,
        }
    }
}

#[async_trait]
impl EventStore for FaultyStore {
    async fn append(
        &self,
        stream: &StreamName,
        expected: ExpectedRevision,
        events: Vec<EventEnvelope>,
    ) -> Result<AppendResult> {
        self.inner.append(stream, expected, events).await
    }

    async fn read_stream(
        &self,
        stream: &StreamName,
        options: ReadOptions,
    ) -> Result<Vec<RecordedEvent>> {
        let mut events = self.inner.read_stream(stream, options).await?;
        match self.fault {
            Fault::ReformatPayload { index } => {
                if let Some(event) = events.get_mut(index) {
                    let value: serde_json::Value = serde_json::from_slice(&event.envelope.data)?;
                    event.envelope.data = Bytes::from(serde_json::to_vec_pretty(&value)?);
                }
            }
            Fault::DropLast => {
                events.pop();
            }
            Fault::RenameType { index } => {
                if let Some(event) = events.get_mut(index) {
                    event.envelope.event_type = "AccountClosed".to_string();
                }
            }
        }
        Ok(events)
    }
}
