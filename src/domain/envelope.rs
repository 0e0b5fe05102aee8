//! Storage envelope for domain events
//!
//! An envelope carries the event id, its type tag, the UTF-8 JSON payload and
//! a small JSON metadata document stamped with the time the envelope was
//! built. Stores deal only in envelopes; they never see domain types.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::{AccountEvent, Event};
use crate::error::Result;

/// Metadata stored alongside every event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvelopeMetadata {
    pub timestamp: DateTime<Utc>,
}

/// Event ready to be appended to, or as read back from, a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub event_type: String,
    pub data: Bytes,
    pub metadata: Bytes,
}

impl EventEnvelope {
    /// Wrap an event, stamping the metadata with the current time
    pub fn from_event<E: Event>(event: &E) -> Result<Self> {
        Self::from_event_at(event, Utc::now())
    }

    pub fn from_event_at<E: Event>(event: &E, timestamp: DateTime<Utc>) -> Result<Self> {
        let data = serde_json::to_vec(event)?;
        let metadata = serde_json::to_vec(&EnvelopeMetadata { timestamp })?;

        Ok(Self {
            id: event.id(),
            event_type: event.event_type().to_string(),
            data: Bytes::from(data),
            metadata: Bytes::from(metadata),
        })
    }

    pub fn metadata(&self) -> Result<EnvelopeMetadata> {
        Ok(serde_json::from_slice(&self.metadata)?)
    }

    /// Turn the payload back into an account event
    pub fn decode(&self) -> Result<AccountEvent> {
        AccountEvent::decode(&self.event_type, &self.data)
    }

    /// Payload as text, for diagnostics
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Payload re-indented for display
    pub fn pretty_payload(&self) -> Result<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.data)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
