//! EventStoreDB backed [`EventStore`]
//!
//! Envelopes are written as JSON events: the payload bytes are handed to the
//! client verbatim and the envelope metadata goes into the event's custom
//! metadata.

use async_trait::async_trait;
use bytes::Bytes;
use eventstore::{
    AppendToStreamOptions, Client, ClientSettings, CurrentRevision, EventData, ReadStreamOptions,
    ResolvedEvent, StreamPosition,
};
use serde_json::value::RawValue;
use tracing::{debug, info, instrument};

use crate::{
    application::event_store::{
        AppendResult, Direction, EventStore, ExpectedRevision, ReadFrom, ReadOptions,
        RecordedEvent,
    },
    config::EsdbSettings,
    domain::{EventEnvelope, StreamName},
    error::{Error, Result},
    infrastructure::log_messages::esdb as messages,
};

/// Event store talking to an EventStoreDB cluster
#[derive(Clone)]
pub struct EsdbEventStore {
    client: Client,
}

impl EsdbEventStore {
    /// Connect using the configured URL with certificate names resolved
    pub fn connect(settings: &EsdbSettings) -> Result<Self> {
        Self::from_connection_string(&settings.normalized_url())
    }

    #[instrument(skip(connection_string))]
    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        info!("{}", messages::CONNECTING);
        let settings: ClientSettings = connection_string
            .parse()
            .map_err(|e| Error::InvalidConnectionString(format!("{e}")))?;
        let client = Client::new(settings).map_err(Error::event_store)?;
        debug!("{}", messages::CLIENT_CREATED);

        Ok(Self { client })
    }
}

impl From<ExpectedRevision> for eventstore::ExpectedRevision {
    fn from(expected: ExpectedRevision) -> Self {
        match expected {
            ExpectedRevision::Any => Self::Any,
            ExpectedRevision::NoStream => Self::NoStream,
            ExpectedRevision::StreamExists => Self::StreamExists,
            ExpectedRevision::Exact(revision) => Self::Exact(revision),
        }
    }
}

fn to_event_data(envelope: EventEnvelope) -> Result<EventData> {
    let payload = String::from_utf8(envelope.data.to_vec())
        .map_err(|e| Error::invalid_input("data", e))?;
    let payload = RawValue::from_string(payload)?;

    Ok(EventData::json(&envelope.event_type, &payload)?
        .id(envelope.id)
        .metadata(envelope.metadata))
}

fn to_recorded(stream: &StreamName, resolved: &ResolvedEvent) -> RecordedEvent {
    let event = resolved.get_original_event();
    RecordedEvent {
        stream: stream.clone(),
        revision: event.revision,
        envelope: EventEnvelope {
            id: event.id,
            event_type: event.event_type.clone(),
            data: Bytes::copy_from_slice(&event.data),
            metadata: Bytes::copy_from_slice(&event.custom_metadata),
        },
    }
}

fn read_stream_options(options: ReadOptions) -> ReadStreamOptions {
    let position = match options.from {
        ReadFrom::Start => StreamPosition::Start,
        ReadFrom::End => StreamPosition::End,
        ReadFrom::Revision(revision) => StreamPosition::Position(revision),
    };
    let max_count = usize::try_from(options.max_count).unwrap_or(usize::MAX);
    let read = ReadStreamOptions::default()
        .position(position)
        .max_count(max_count);

    match options.direction {
        Direction::Forwards => read.forwards(),
        Direction::Backwards => read.backwards(),
    }
}

fn current_revision(current: CurrentRevision) -> Option<u64> {
    match current {
        CurrentRevision::Current(revision) => Some(revision),
        CurrentRevision::NoStream => None,
    }
}

fn append_error(
    stream: &StreamName,
    expected: ExpectedRevision,
    error: eventstore::Error,
) -> Error {
    match error {
        eventstore::Error::WrongExpectedVersion { current, .. } => Error::WrongExpectedRevision {
            stream: stream.to_string(),
            expected,
            actual: current_revision(current),
        },
        other => Error::event_store(other),
    }
}

#[async_trait]
impl EventStore for EsdbEventStore {
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

        let events = events
            .into_iter()
            .map(to_event_data)
            .collect::<Result<Vec<_>>>()?;
        let options = AppendToStreamOptions::default().expected_revision(expected.into());

        let written = self
            .client
            .append_to_stream(stream.as_str(), &options, events)
            .await
            .map_err(|e| append_error(stream, expected, e))?;

        debug!(
            next_expected_revision = written.next_expected_version,
            "{}",
            messages::APPENDED
        );
        Ok(AppendResult {
            next_expected_revision: written.next_expected_version,
        })
    }

    #[instrument(skip(self))]
    async fn read_stream(
        &self,
        stream: &StreamName,
        options: ReadOptions,
    ) -> Result<Vec<RecordedEvent>> {
        let mut reader = self
            .client
            .read_stream(stream.as_str(), &read_stream_options(options))
            .await
            .map_err(Error::event_store)?;

        let mut recorded = Vec::new();
        loop {
            match reader.next().await {
                Ok(Some(resolved)) => recorded.push(to_recorded(stream, &resolved)),
                Ok(None) => break,
                Err(eventstore::Error::ResourceNotFound) => {
                    return Err(Error::StreamNotFound(stream.to_string()))
                }
                Err(e) => return Err(Error::event_store(e)),
            }
        }

        debug!(read = recorded.len(), "{}", messages::READ);
        Ok(recorded)
    }
}
