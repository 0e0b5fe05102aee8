//! Synthetic account batches
//!
//! A batch is one freshly opened account, its `AccountCreated` event and a
//! run of balance changes with random deltas.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rust_decimal::Decimal;
use std::ops::Range;

use crate::{
    domain::{
        Account, AccountBalanceChanged, AccountCreated, AccountEvent, AccountName, EventEnvelope,
        StreamName,
    },
    error::{Error, Result},
};

/// Deltas are drawn uniformly from this range
pub const DELTA_RANGE: Range<i64> = -100..100;

/// Name given to every generated account
pub const ACCOUNT_NAME: &str = "test";

/// Events generated for a single account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBatch {
    pub account: Account,
    pub events: Vec<AccountEvent>,
}

impl AccountBatch {
    pub fn stream_name(&self, prefix: &str) -> Result<StreamName> {
        StreamName::for_account(prefix, &self.account.id)
    }

    /// Wrap every event for storage
    pub fn envelopes(&self) -> Result<Vec<EventEnvelope>> {
        self.events.iter().map(EventEnvelope::from_event).collect()
    }
}

/// Produces account batches from a random source
pub struct BatchGenerator<R> {
    rng: R,
    balance_changes: u32,
    account_name: AccountName,
}

impl BatchGenerator<StdRng> {
    pub fn from_entropy(balance_changes: u32) -> Result<Self> {
        Self::new(StdRng::from_entropy(), balance_changes)
    }

    /// Deterministic generator, for reproducible runs
    pub fn seeded(seed: u64, balance_changes: u32) -> Result<Self> {
        Self::new(StdRng::seed_from_u64(seed), balance_changes)
    }
}

impl<R: Rng> BatchGenerator<R> {
    pub fn new(rng: R, balance_changes: u32) -> Result<Self> {
        let account_name = AccountName::try_new(ACCOUNT_NAME.to_string())
            .map_err(|e| Error::invalid_input("account_name", e))?;

        Ok(Self {
            rng,
            balance_changes,
            account_name,
        })
    }

    /// Number of events in every batch
    pub fn batch_len(&self) -> usize {
        self.balance_changes as usize + 1
    }

    pub fn next_batch(&mut self) -> AccountBatch {
        let account = Account::open(self.account_name.clone());
        let mut events = Vec::with_capacity(self.batch_len());
        events.push(AccountCreated::new(account.clone()).into());

        for _ in 0..self.balance_changes {
            let delta = Decimal::from(self.rng.gen_range(DELTA_RANGE));
            events.push(AccountBalanceChanged::new(account.id, delta).into());
        }

        AccountBatch { account, events }
    }
}
