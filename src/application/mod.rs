//! Application services
//!
//! The event store contract, the batch generator and the round trip that
//! ties them together.

pub mod event_store;
pub mod generator;
pub mod round_trip;

pub use event_store::{
    AppendResult, Direction, EventStore, ExpectedRevision, InMemoryEventStore, ReadFrom,
    ReadOptions, RecordedEvent,
};
pub use generator::{AccountBatch, BatchGenerator};
pub use round_trip::{verify_batch, RoundTrip, RoundTripReport};
