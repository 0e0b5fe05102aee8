//! Log message constants
//!
//! Message text lives here so the wording stays consistent between the
//! library and the binary. Context goes into structured fields, not the text.

/// Application startup and lifecycle messages
pub mod application {
    pub const STARTING: &str = "Starting account events round trip";
    pub const SETTINGS_LOADED: &str = "Settings loaded";
    pub const FINISHED: &str = "Round trip finished";
}

/// EventStoreDB connection messages
pub mod esdb {
    pub const CONNECTING: &str = "Connecting to EventStoreDB";
    pub const CLIENT_CREATED: &str = "EventStoreDB client created";
    pub const APPENDED: &str = "Appended events to EventStoreDB";
    pub const READ: &str = "Read events from EventStoreDB";
}

/// Round trip progress messages
pub mod round_trip {
    pub const BATCH_APPENDED: &str = "Batch appended";
    pub const EVENT_READ: &str = "Event read back";
    pub const ITERATION_COMPLETED: &str = "Iteration verified";
    pub const RUN_COMPLETED: &str = "All iterations verified";
}
