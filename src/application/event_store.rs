//! Event store abstraction for account streams
//!
//! This module defines the contract every backend honors: appends are
//! atomic per call, revisions are zero-based and contiguous within a stream,
//! and optimistic concurrency is expressed with [`ExpectedRevision`].
//! [`InMemoryEventStore`] is the reference implementation.

use async_trait::async_trait;
use derive_more::Display;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{
    domain::{EventEnvelope, StreamName},
    error::{Error, Result},
};

/// Stream state an append is conditional on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ExpectedRevision {
    #[display("any")]
    Any,
    #[display("no stream")]
    NoStream,
    #[display("stream exists")]
    StreamExists,
    #[display("revision {_0}")]
    Exact(u64),
}

impl ExpectedRevision {
    /// Whether a stream whose last revision is `current` satisfies this expectation
    pub fn accepts(self, current: Option<u64>) -> bool {
        match (self, current) {
            (Self::Any, _) => true,
            (Self::NoStream, None) => true,
            (Self::StreamExists, Some(_)) => true,
            (Self::Exact(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Direction {
    #[default]
    Forwards,
    Backwards,
}

/// Where a read starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFrom {
    #[default]
    Start,
    End,
    Revision(u64),
}

/// Options for reading a single stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub direction: Direction,
    pub from: ReadFrom,
    pub max_count: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Forwards,
            from: ReadFrom::Start,
            max_count: 100,
        }
    }
}

impl ReadOptions {
    pub fn forwards(mut self) -> Self {
        self.direction = Direction::Forwards;
        self
    }

    pub fn backwards(mut self) -> Self {
        self.direction = Direction::Backwards;
        self
    }

    pub fn starting_at(mut self, from: ReadFrom) -> Self {
        self.from = from;
        self
    }

    pub fn max_count(mut self, max_count: u64) -> Self {
        self.max_count = max_count;
        self
    }
}

/// An envelope as stored, with its position in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub stream: StreamName,
    pub revision: u64,
    pub envelope: EventEnvelope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendResult {
    /// Revision of the last event written
    pub next_expected_revision: u64,
}

/// Storage for account event streams
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append a non-empty batch of envelopes to a stream in one call
    async fn append(
        &self,
        stream: &StreamName,
        expected: ExpectedRevision,
        events: Vec<EventEnvelope>,
    ) -> Result<AppendResult>;

    /// Read events from one stream
    async fn read_stream(
        &self,
        stream: &StreamName,
        options: ReadOptions,
    ) -> Result<Vec<RecordedEvent>>;
}

#[async_trait]
impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    async fn append(
        &self,
        stream: &StreamName,
        expected: ExpectedRevision,
        events: Vec<EventEnvelope>,
    ) -> Result<AppendResult> {
        (**self).append(stream, expected, events).await
    }

    async fn read_stream(
        &self,
        stream: &StreamName,
        options: ReadOptions,
    ) -> Result<Vec<RecordedEvent>> {
        (**self).read_stream(stream, options).await
    }
}

/// Event store that keeps streams in process memory
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    streams: Arc<RwLock<HashMap<StreamName, Vec<RecordedEvent>>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of streams holding at least one event
    pub async fn stream_count(&self) -> usize {
        self.streams.read().await.len()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    async fn append(
        &self,
        stream: &StreamName,
        expected: ExpectedRevision,
        events: Vec<EventEnvelope>,
    ) -> Result<AppendResult> {
        if events.is_empty() {
            return Err(Error::EmptyAppend {
                stream: stream.to_string(),
            });
        }

        let mut streams = self.streams.write().await;
        let current = streams
            .get(stream)
            .and_then(|recorded| recorded.last())
            .map(|event| event.revision);

        if !expected.accepts(current) {
            return Err(Error::WrongExpectedRevision {
                stream: stream.to_string(),
                expected,
                actual: current,
            });
        }

        let recorded = streams.entry(stream.clone()).or_default();
        let first_revision = current.map_or(0, |revision| revision + 1);
        for (offset, envelope) in events.into_iter().enumerate() {
            recorded.push(RecordedEvent {
                stream: stream.clone(),
                revision: first_revision + offset as u64,
                envelope,
            });
        }

        let next_expected_revision = recorded.len() as u64 - 1;
        debug!(next_expected_revision, "appended events");
        Ok(AppendResult {
            next_expected_revision,
        })
    }

    #[instrument(skip(self))]
    async fn read_stream(
        &self,
        stream: &StreamName,
        options: ReadOptions,
    ) -> Result<Vec<RecordedEvent>> {
        let streams = self.streams.read().await;
        let recorded = streams
            .get(stream)
            .ok_or_else(|| Error::StreamNotFound(stream.to_string()))?;

        let limit = usize::try_from(options.max_count).unwrap_or(usize::MAX);
        let events: Vec<RecordedEvent> = match options.direction {
            Direction::Forwards => {
                let start = match options.from {
                    ReadFrom::Start => 0,
                    ReadFrom::End => u64::MAX,
                    ReadFrom::Revision(revision) => revision,
                };
                recorded
                    .iter()
                    .filter(|event| event.revision >= start)
                    .take(limit)
                    .cloned()
                    .collect()
            }
            Direction::Backwards => {
                let start = match options.from {
                    ReadFrom::Start => 0,
                    ReadFrom::End => u64::MAX,
                    ReadFrom::Revision(revision) => revision,
                };
                recorded
                    .iter()
                    .rev()
                    .filter(|event| event.revision <= start)
                    .take(limit)
                    .cloned()
                    .collect()
            }
        };

        debug!(read = events.len(), "read events");
        Ok(events)
    }
}
