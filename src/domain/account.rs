use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::domain::identifiers::AccountId;

/// Display name of an account
#[nutype(
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct AccountName(String);

/// Snapshot of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub created: DateTime<Utc>,
}

impl Account {
    /// Open a new account with a fresh id, created now
    pub fn open(name: AccountName) -> Self {
        Self {
            id: AccountId::generate(),
            name,
            created: Utc::now(),
        }
    }
}
