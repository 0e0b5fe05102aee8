use crate::application::ExpectedRevision;
use thiserror::Error;

/// Account events error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid stream name: {0}")]
    InvalidStreamName(String),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("{0} parameter is required in the connection string")]
    MissingConnectionParameter(String),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("Cannot append an empty event batch to {stream}")]
    EmptyAppend { stream: String },

    #[error("Wrong expected revision on {stream}: expected {expected}, actual {actual:?}")]
    WrongExpectedRevision {
        stream: String,
        expected: ExpectedRevision,
        actual: Option<u64>,
    },

    #[error("Stream not found: {0}")]
    StreamNotFound(String),

    #[error("Event store error: {0}")]
    EventStore(String),

    #[error("Read back {actual} events from {stream}, expected {expected}")]
    EventCountMismatch {
        stream: String,
        expected: usize,
        actual: usize,
    },

    #[error("Event {index} on {stream} has type {actual}, expected {expected}")]
    EventTypeMismatch {
        stream: String,
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("Payload of event {index} on {stream} differs: wrote {expected}, read {actual}")]
    PayloadMismatch {
        stream: String,
        index: usize,
        expected: String,
        actual: String,
    },
}

impl Error {
    pub fn invalid_input(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    pub fn event_store(error: impl ToString) -> Self {
        Self::EventStore(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
