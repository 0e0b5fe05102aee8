//! Domain types for account event streams
//!
//! The records stored in a stream, the identifiers they carry, stream naming
//! and the envelope every event is wrapped in before it reaches a store.

pub mod account;
pub mod envelope;
pub mod events;
pub mod identifiers;
pub mod streams;

pub use account::*;
pub use envelope::*;
pub use events::*;
pub use identifiers::*;
pub use streams::*;
