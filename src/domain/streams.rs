//! Stream naming
//!
//! Account streams are named `{prefix}-{account_id}`. Names starting with `$`
//! are reserved for the store's own system streams and are rejected.

use nutype::nutype;

use crate::domain::identifiers::AccountId;
use crate::error::{Error, Result};

/// Longest stream name accepted, in bytes
pub const MAX_STREAM_NAME_LEN: usize = 1024;

/// Name of a stream in the event store
#[nutype(
    validate(predicate = |name| !name.is_empty()
        && !name.starts_with('$')
        && name.len() <= 1024),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        PartialOrd,
        Ord,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct StreamName(String);

impl StreamName {
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::try_new(name.clone()).map_err(|_| Error::InvalidStreamName(name))
    }

    /// Stream holding every event of one account
    pub fn for_account(prefix: &str, account_id: &AccountId) -> Result<Self> {
        Self::parse(format!("{prefix}-{account_id}"))
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_account_stream_name() {
        let account_id = AccountId::generate();
        let stream = StreamName::for_account("chris", &account_id).unwrap();
        assert_eq!(stream.as_str(), format!("chris-{account_id}"));
    }

    #[rstest]
    #[case("")]
    #[case("$all")]
    #[case("$ce-account")]
    fn test_rejected_stream_names(#[case] name: &str) {
        assert!(matches!(
            StreamName::parse(name),
            Err(Error::InvalidStreamName(rejected)) if rejected == name
        ));
    }

    #[test]
    fn test_stream_name_length_limit() {
        assert!(StreamName::parse("a".repeat(MAX_STREAM_NAME_LEN)).is_ok());
        assert!(StreamName::parse("a".repeat(MAX_STREAM_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_system_prefix_rejected_for_accounts() {
        assert!(StreamName::for_account("$system", &AccountId::generate()).is_err());
    }
}
