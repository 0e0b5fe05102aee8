use account_events::{
    application::{BatchGenerator, RoundTrip},
    config::Settings,
    infrastructure::{
        log_messages::application as messages, logging, ConnectionString, EsdbEventStore,
    },
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, instrument};

/// Write synthetic account event streams to EventStoreDB and verify they
/// read back byte for byte
///
/// Without arguments the EventStoreDB URL comes from the settings file.
/// With a connection string, its certificate parameters are resolved
/// against the given directory and it is used instead.
#[derive(Debug, Parser)]
#[command(name = "account_events", version, about, long_about)]
struct Cli {
    /// EventStoreDB connection string carrying `userCertFile`,
    /// `userKeyFile` and `tlsCaFile`
    #[arg(requires = "certificate_dir")]
    connection_string: Option<String>,

    /// Directory holding the certificate files named in the connection string
    #[arg(requires = "connection_string")]
    certificate_dir: Option<String>,
}

impl Cli {
    fn connect(&self, settings: &Settings) -> Result<EsdbEventStore> {
        let store = match (&self.connection_string, &self.certificate_dir) {
            (Some(connection_string), Some(certificate_dir)) => {
                let connection = ConnectionString::parse(connection_string.as_str())?
                    .with_certificate_dir(certificate_dir)?;
                EsdbEventStore::from_connection_string(connection.as_ref())?
            }
            _ => EsdbEventStore::connect(&settings.esdb)?,
        };
        Ok(store)
    }
}

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new().context("loading settings")?;
    logging::init(&settings.logging)?;

    info!("{}", messages::STARTING);
    info!(
        iterations = settings.round_trip.iterations,
        stream_prefix = %settings.esdb.stream_prefix,
        "{}",
        messages::SETTINGS_LOADED
    );

    let store = cli.connect(&settings)?;
    let generator = BatchGenerator::from_entropy(settings.round_trip.balance_changes)?;
    let mut round_trip = RoundTrip::new(
        store,
        generator,
        settings.esdb.stream_prefix.clone(),
        settings.round_trip,
    );
    let report = round_trip.run().await?;

    for stream in &report.streams {
        info!(%stream, "Stream Name");
    }
    info!(
        streams = report.streams.len(),
        events_verified = report.events_verified,
        "{}",
        messages::FINISHED
    );

    Ok(())
}
