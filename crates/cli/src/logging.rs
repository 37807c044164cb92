//! Diagnostic logging for the CLI.
//!
//! User-facing messages go through [`crate::output::OutputSink`]; this only
//! configures `tracing` output on stderr.

use crate::error::CliError;
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration derived from global flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json_format: bool,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    pub fn from_flags(verbose: bool, json: bool, no_color: bool) -> Self {
        Self {
            level: if verbose { "debug" } else { "warn" }.to_string(),
            json_format: json,
            ansi: !no_color,
        }
    }
}

/// Install the global subscriber; `RUST_LOG` takes precedence over the level
pub fn init_logging(config: &LoggingConfig) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json_format {
        registry
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init()
    } else {
        registry
            .with(
                Layer::new()
                    .with_writer(io::stderr)
                    .with_ansi(config.ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()
    };

    result.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_select_level_and_format() {
        assert_eq!(LoggingConfig::from_flags(false, false, false), LoggingConfig::default());

        let config = LoggingConfig::from_flags(true, true, true);
        assert_eq!(config.level, "debug");
        assert!(config.json_format);
        assert!(!config.ansi);
    }
}
