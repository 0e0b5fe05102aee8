use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Environment variable naming the JSON configuration file
pub const CONFIG_PATH_VAR: &str = "ACCOUNT_EVENTS_CONFIG";

/// Configuration file used when [`CONFIG_PATH_VAR`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Certificate files that may appear by name in the EventStoreDB URL
pub const CERTIFICATE_FILES: [&str; 3] = ["ca.crt", "tls.crt", "tls.key"];

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub esdb: EsdbSettings,
    pub round_trip: RoundTripSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EsdbSettings {
    pub url: String,
    #[serde(
        rename = "certificateDir",
        alias = "certificatedir",
        alias = "certificate_dir"
    )]
    pub certificate_dir: String,
    #[serde(
        rename = "streamPrefix",
        alias = "streamprefix",
        alias = "stream_prefix",
        default = "default_stream_prefix"
    )]
    pub stream_prefix: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RoundTripSettings {
    pub iterations: u32,
    pub balance_changes: u32,
    pub read_batch_size: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

fn default_stream_prefix() -> String {
    "account".to_string()
}

impl Default for RoundTripSettings {
    fn default() -> Self {
        Self {
            iterations: 10,
            balance_changes: 5,
            read_batch_size: 100,
        }
    }
}

impl Settings {
    /// Load settings from the file named by `ACCOUNT_EVENTS_CONFIG`, or
    /// `config.json` in the working directory.
    pub fn new() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(path)
    }

    /// Load settings from a JSON file, with built-in defaults underneath and
    /// `ACCOUNT_EVENTS__*` environment variables on top.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_string_lossy();
        let config = Config::builder()
            .set_default("round_trip.iterations", 10)?
            .set_default("round_trip.balance_changes", 5)?
            .set_default("round_trip.read_batch_size", 100)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::new(&path, FileFormat::Json).required(true))
            .add_source(
                Environment::with_prefix("ACCOUNT_EVENTS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl EsdbSettings {
    /// Rewrite bare certificate file names in the URL to paths under
    /// `certificate_dir`.
    pub fn normalized_url(&self) -> String {
        CERTIFICATE_FILES.iter().fold(self.url.clone(), |url, file| {
            url.replace(file, &format!("{}/{}", self.certificate_dir, file))
        })
    }
}
