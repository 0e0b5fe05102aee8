use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;
use crate::error::{Error, Result};

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(Error::invalid_input(
                "logging.format",
                format!("unknown log format '{other}'"),
            )),
        }
    }
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured level
pub fn env_filter(settings: &LoggingSettings) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| Error::invalid_input("logging.level", e))
}

/// Install the global tracing subscriber
pub fn init(settings: &LoggingSettings) -> Result<()> {
    let format = settings.format.parse::<LogFormat>()?;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(settings)?);

    match format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| Error::invalid_input("logging", e))
}
