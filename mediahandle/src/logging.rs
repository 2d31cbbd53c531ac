//! Structured logging setup

use crate::config::LoggingConfig;
use mediahandle_media::{MediaError, MediaResult};
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over [`LoggingConfig::filter`]. Fails if the
/// filter does not parse or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> MediaResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| MediaError::Configuration {
            message: format!("invalid log filter '{}': {}", config.filter, e),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| MediaError::Configuration {
            message: format!("failed to install subscriber: {}", e),
        })
}
