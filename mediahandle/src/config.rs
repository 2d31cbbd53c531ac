//! Configuration types and defaults

use serde::{Deserialize, Serialize};

/// Options for wrapping an existing capture stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleOptions {
    /// Stream was captured on this device
    pub local: bool,
    /// Start with audio tracks disabled
    pub muted: bool,
    /// Start with video tracks disabled
    pub paused: bool,
}

impl HandleOptions {
    /// Options for a locally captured stream
    pub fn local() -> Self {
        Self {
            local: true,
            ..Self::default()
        }
    }
}

/// Options for acquiring a new capture stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquireOptions {
    /// Mark the acquired stream as local
    pub local: bool,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self { local: true }
    }
}

impl From<AcquireOptions> for HandleOptions {
    fn from(options: AcquireOptions) -> Self {
        Self {
            local: options.local,
            ..Self::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub filter: String,
    /// Include the event target in log lines
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Debug-level logging
    pub fn debug() -> Self {
        Self {
            filter: "debug".to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_options_default() {
        let options = HandleOptions::default();
        assert!(!options.local);
        assert!(!options.muted);
        assert!(!options.paused);
        assert!(HandleOptions::local().local);
    }

    #[test]
    fn test_acquire_options_default_local() {
        assert!(AcquireOptions::default().local);

        let handle_options = HandleOptions::from(AcquireOptions::default());
        assert!(handle_options.local);
        assert!(!handle_options.muted);
        assert!(!handle_options.paused);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: HandleOptions = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert_eq!(
            options,
            HandleOptions {
                local: false,
                muted: true,
                paused: false,
            }
        );

        let acquire: AcquireOptions = serde_json::from_str("{}").unwrap();
        assert!(acquire.local);

        let logging: LoggingConfig = serde_json::from_str(r#"{"with_target": true}"#).unwrap();
        assert_eq!(logging.filter, "info");
        assert!(logging.with_target);
    }
}
