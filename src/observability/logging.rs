//! # Structured Logging
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured `LOG_LEVEL`; `LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ObservabilityConfig};
use crate::errors::{Error, Result};

/// Build the level filter from `RUST_LOG`, falling back to `default_level`.
pub fn build_env_filter(default_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level)
            .map_err(|e| Error::config(format!("Invalid log level '{}': {}", default_level, e))),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = build_env_filter(&config.log_level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match config.log_format {
        LogFormat::Json => builder.json().with_current_span(true).try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|e| Error::config(format!("Failed to install log subscriber: {}", e)))
}
