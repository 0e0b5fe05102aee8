//! Events recorded about accounts
//!
//! Every record that goes into a stream implements [`Event`], which supplies
//! the envelope id and the type tag used to dispatch deserialization when the
//! event is read back.

use derive_more::From;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    account::Account,
    identifiers::{AccountId, EventId},
};
use crate::error::{Error, Result};

/// A record that can be wrapped in an envelope and stored
pub trait Event: Serialize {
    /// Id the envelope is stored under
    fn id(&self) -> Uuid;

    /// Type tag the envelope is stored under
    fn event_type(&self) -> &'static str;
}

/// An account was opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreated {
    pub id: EventId,
    pub account: Account,
}

/// The balance of an account moved by `delta`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalanceChanged {
    pub id: EventId,
    pub account_id: AccountId,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub delta: Decimal,
}

impl AccountCreated {
    pub const EVENT_TYPE: &'static str = "AccountCreated";

    pub fn new(account: Account) -> Self {
        Self {
            id: EventId::generate(),
            account,
        }
    }
}

impl AccountBalanceChanged {
    pub const EVENT_TYPE: &'static str = "AccountBalanceChanged";

    pub fn new(account_id: AccountId, delta: Decimal) -> Self {
        Self {
            id: EventId::generate(),
            account_id,
            delta,
        }
    }
}

impl Account {
    pub const EVENT_TYPE: &'static str = "Account";
}

impl Event for Account {
    fn id(&self) -> Uuid {
        self.id.into_inner()
    }

    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }
}

impl Event for AccountCreated {
    fn id(&self) -> Uuid {
        self.id.into_inner()
    }

    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }
}

impl Event for AccountBalanceChanged {
    fn id(&self) -> Uuid {
        self.id.into_inner()
    }

    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }
}

/// Any event that can appear in an account stream
///
/// Serializes exactly like the wrapped event; the variant is carried by the
/// envelope's type tag, not by the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, From)]
#[serde(untagged)]
pub enum AccountEvent {
    Created(AccountCreated),
    BalanceChanged(AccountBalanceChanged),
}

impl AccountEvent {
    /// Deserialize a payload, choosing the event type by its tag
    pub fn decode(event_type: &str, data: &[u8]) -> Result<Self> {
        match event_type {
            AccountCreated::EVENT_TYPE => Ok(Self::Created(serde_json::from_slice(data)?)),
            AccountBalanceChanged::EVENT_TYPE => {
                Ok(Self::BalanceChanged(serde_json::from_slice(data)?))
            }
            other => Err(Error::UnknownEventType(other.to_string())),
        }
    }

    /// Account the event belongs to
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::Created(event) => event.account.id,
            Self::BalanceChanged(event) => event.account_id,
        }
    }
}

impl Event for AccountEvent {
    fn id(&self) -> Uuid {
        match self {
            Self::Created(event) => event.id(),
            Self::BalanceChanged(event) => event.id(),
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            Self::Created(event) => event.event_type(),
            Self::BalanceChanged(event) => event.event_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountName;

    fn account() -> Account {
        Account::open(AccountName::try_new("test".to_string()).unwrap())
    }

    #[test]
    fn test_type_tags_are_type_names() {
        let account = account();
        let created = AccountCreated::new(account.clone());
        let changed = AccountBalanceChanged::new(account.id, Decimal::from(-42));

        assert_eq!(account.event_type(), "Account");
        assert_eq!(created.event_type(), "AccountCreated");
        assert_eq!(changed.event_type(), "AccountBalanceChanged");
        assert_eq!(AccountEvent::from(changed).event_type(), "AccountBalanceChanged");
    }

    #[test]
    fn test_balance_changed_uses_camel_case() {
        let account = account();
        let changed = AccountBalanceChanged::new(account.id, Decimal::from(17));
        let json = serde_json::to_value(&changed).unwrap();

        assert_eq!(json["accountId"], account.id.to_string());
        assert!(json.get("account_id").is_none());
        assert!(json.get("delta").is_some());
    }

    #[test]
    fn test_delta_is_written_as_json_number() {
        let account = account();
        let changed = AccountBalanceChanged::new(account.id, Decimal::from(-42));
        let json = serde_json::to_string(&changed).unwrap();

        assert!(json.contains(r#""delta":-42"#), "{json}");

        let fractional = AccountBalanceChanged::new(account.id, Decimal::new(1050, 2));
        let json = serde_json::to_string(&fractional).unwrap();
        assert!(json.contains(r#""delta":10.50"#), "{json}");
        let decoded: AccountBalanceChanged = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.delta, Decimal::new(1050, 2));
    }

    #[test]
    fn test_numeric_delta_from_other_writers_decodes() {
        let account = account();
        let data = format!(
            r#"{{"id":"{}","accountId":"{}","delta":-17}}"#,
            EventId::generate(),
            account.id
        );

        let decoded = AccountEvent::decode("AccountBalanceChanged", data.as_bytes()).unwrap();
        let AccountEvent::BalanceChanged(changed) = decoded else {
            panic!("expected a balance change");
        };
        assert_eq!(changed.delta, Decimal::from(-17));
    }

    #[test]
    fn test_account_event_serializes_like_inner_event() {
        let created = AccountCreated::new(account());
        let wrapped = AccountEvent::from(created.clone());

        assert_eq!(
            serde_json::to_vec(&wrapped).unwrap(),
            serde_json::to_vec(&created).unwrap()
        );
    }

    #[test]
    fn test_decode_dispatches_on_type_tag() {
        let account = account();
        let changed = AccountBalanceChanged::new(account.id, Decimal::from(99));
        let data = serde_json::to_vec(&changed).unwrap();

        let decoded = AccountEvent::decode("AccountBalanceChanged", &data).unwrap();
        assert_eq!(decoded, AccountEvent::BalanceChanged(changed));
        assert_eq!(decoded.account_id(), account.id);
    }

    #[test]
    fn test_decode_rejects_unknown_type_tag() {
        let result = AccountEvent::decode("AccountClosed", b"{}");
        assert!(matches!(result, Err(Error::UnknownEventType(tag)) if tag == "AccountClosed"));
    }

    #[test]
    fn test_decode_rejects_payload_of_wrong_shape() {
        let created = AccountCreated::new(account());
        let data = serde_json::to_vec(&created).unwrap();

        let result = AccountEvent::decode("AccountBalanceChanged", &data);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
