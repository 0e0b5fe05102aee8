//! Round trip against a live EventStoreDB
//!
//! Needs a reachable cluster described by `config.json` (or the file named by
//! `ACCOUNT_EVENTS_CONFIG`). Run with:
//! cargo test --test esdb_round_trip -- --ignored

#![cfg(feature = "esdb")]

use account_events::application::{BatchGenerator, RoundTrip};
use account_events::config::Settings;
use account_events::infrastructure::EsdbEventStore;

#[tokio::test]
#[ignore = "requires EventStoreDB"]
async fn should_persist_events() {
    let settings = Settings::new().expect("Failed to load settings");
    let store = EsdbEventStore::connect(&settings.esdb).expect("Failed to create client");
    let generator = BatchGenerator::from_entropy(settings.round_trip.balance_changes)
        .expect("Failed to create generator");
    let mut round_trip = RoundTrip::new(
        store,
        generator,
        settings.esdb.stream_prefix.clone(),
        settings.round_trip,
    );

    let report = round_trip.run().await.expect("Round trip failed");
    assert_eq!(
        report.events_verified,
        settings.round_trip.iterations as usize
            * (settings.round_trip.balance_changes as usize + 1)
    );
}
