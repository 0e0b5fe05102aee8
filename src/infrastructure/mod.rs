//! Infrastructure layer
//!
//! Logging setup, connection string handling and the EventStoreDB backend.

pub mod connection;
#[cfg(feature = "esdb")]
pub mod esdb;
pub mod log_messages;
pub mod logging;

pub use connection::ConnectionString;
#[cfg(feature = "esdb")]
pub use esdb::EsdbEventStore;
