//! Account events - append/read round trips against EventStoreDB
//!
//! Generates synthetic account event streams, writes them through an
//! [`application::EventStore`] and verifies that every payload read back is
//! byte-for-byte what was written.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{EventStore, InMemoryEventStore, RoundTrip, RoundTripReport};
pub use error::{Error, Result};

