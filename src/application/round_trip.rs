//! Append/read round trip against an event store
//!
//! Each iteration generates one account batch, appends it to the account's
//! stream in a single call, reads the stream back from the start and checks
//! that every payload read is byte-for-byte the payload that was written.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        event_store::{EventStore, ExpectedRevision, ReadFrom, ReadOptions, RecordedEvent},
        generator::{AccountBatch, BatchGenerator},
    },
    config::RoundTripSettings,
    domain::{AccountEvent, EventEnvelope, StreamName},
    error::{Error, Result},
    infrastructure::log_messages::round_trip as messages,
};

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundTripReport {
    pub streams: Vec<StreamName>,
    pub events_verified: usize,
}

/// Drives batches through a store and verifies what comes back
pub struct RoundTrip<S, R> {
    store: S,
    generator: BatchGenerator<R>,
    stream_prefix: String,
    settings: RoundTripSettings,
}

impl<S: EventStore, R: Rng> RoundTrip<S, R> {
    pub fn new(
        store: S,
        generator: BatchGenerator<R>,
        stream_prefix: impl Into<String>,
        settings: RoundTripSettings,
    ) -> Self {
        Self {
            store,
            generator,
            stream_prefix: stream_prefix.into(),
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run every configured iteration, stopping at the first failure
    #[instrument(skip(self), fields(iterations = self.settings.iterations))]
    pub async fn run(&mut self) -> Result<RoundTripReport> {
        let mut report = RoundTripReport::default();

        for iteration in 0..self.settings.iterations {
            let (stream, verified) = self.run_once().await?;
            debug!(iteration, %stream, verified, "{}", messages::ITERATION_COMPLETED);
            report.streams.push(stream);
            report.events_verified += verified;
        }

        info!(
            streams = report.streams.len(),
            events = report.events_verified,
            "{}",
            messages::RUN_COMPLETED
        );
        Ok(report)
    }

    /// Generate, append, read back and verify one batch
    pub async fn run_once(&mut self) -> Result<(StreamName, usize)> {
        let batch = self.generator.next_batch();
        let stream = batch.stream_name(&self.stream_prefix)?;

        self.append_batch(&stream, &batch).await?;

        let read = self.read_all(&stream).await?;
        for event in &read {
            log_recorded(event);
        }

        let verified = verify_batch(&stream, &batch.events, &read)?;
        Ok((stream, verified))
    }

    #[instrument(skip(self, batch), fields(events = batch.events.len()))]
    async fn append_batch(&self, stream: &StreamName, batch: &AccountBatch) -> Result<()> {
        let result = self
            .store
            .append(stream, ExpectedRevision::Any, batch.envelopes()?)
            .await?;
        debug!(
            next_expected_revision = result.next_expected_revision,
            "{}",
            messages::BATCH_APPENDED
        );
        Ok(())
    }
}

impl<S: EventStore, R> RoundTrip<S, R> {
    /// Read a stream forwards from the start, one page of
    /// `read_batch_size` events at a time, until it is exhausted
    async fn read_all(&self, stream: &StreamName) -> Result<Vec<RecordedEvent>> {
        let page_size = self.settings.read_batch_size.max(1);
        let mut events = Vec::new();
        let mut from = ReadFrom::Start;

        loop {
            let options = ReadOptions::default()
                .forwards()
                .starting_at(from)
                .max_count(page_size);
            let page = self.store.read_stream(stream, options).await?;
            let exhausted = (page.len() as u64) < page_size;

            match page.last() {
                Some(last) => from = ReadFrom::Revision(last.revision + 1),
                None => break,
            }
            events.extend(page);
            if exhausted {
                break;
            }
        }

        Ok(events)
    }
}

fn log_recorded(event: &RecordedEvent) {
    let payload = event
        .envelope
        .pretty_payload()
        .unwrap_or_else(|_| event.envelope.payload_text());
    debug!(
        stream = %event.stream,
        revision = event.revision,
        event_type = %event.envelope.event_type,
        "{}\n{}",
        messages::EVENT_READ,
        payload
    );
}

/// Compare what was written to a stream with what was read from it
///
/// Payloads are re-serialized from the written events and compared as bytes;
/// type tags must match too. Returns the number of events verified.
pub fn verify_batch(
    stream: &StreamName,
    written: &[AccountEvent],
    read: &[RecordedEvent],
) -> Result<usize> {
    if written.len() != read.len() {
        return Err(Error::EventCountMismatch {
            stream: stream.to_string(),
            expected: written.len(),
            actual: read.len(),
        });
    }

    for (index, (event, recorded)) in written.iter().zip(read).enumerate() {
        let expected = EventEnvelope::from_event(event)?;

        if expected.event_type != recorded.envelope.event_type {
            return Err(Error::EventTypeMismatch {
                stream: stream.to_string(),
                index,
                expected: expected.event_type,
                actual: recorded.envelope.event_type.clone(),
            });
        }

        if expected.data != recorded.envelope.data {
            return Err(Error::PayloadMismatch {
                stream: stream.to_string(),
                index,
                expected: expected.payload_text(),
                actual: recorded.envelope.payload_text(),
            });
        }
    }

    Ok(written.len())
}
