//! Identifiers for accounts and the events recorded about them
//!
//! Both are newtypes around UUID v7 so they sort by creation time and
//! serialize as plain hyphenated strings.

use nutype::nutype;
use uuid::Uuid;

/// Unique identifier for an account
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef
))]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::generate()
    }
}

/// Unique identifier for a single stored event
///
/// Doubles as the envelope id, so the store can deduplicate retried appends.
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRef
))]
pub struct EventId(Uuid);

impl EventId {
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::generate()
    }
}
