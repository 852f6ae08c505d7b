//! Tracing subscriber setup
//!
//! Log records go to stderr; stdout is reserved for the status lines of a
//! provisioning run and the output of the `plan` command.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{BootstrapError, BootstrapResult, ResultExt};
use tracing_subscriber::EnvFilter;

/// Build the level filter; `RUST_LOG` wins over the configured level
pub fn env_filter(config: &LoggingConfig) -> BootstrapResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .config_context(format!("Building the tracing filter from level '{}'", config.level))
}

/// Install the global tracing subscriber
///
/// Calling it a second time in the same process is an error.
pub fn init_logging(config: &LoggingConfig) -> BootstrapResult<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    result.map_err(|e| BootstrapError::other(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_from_config() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Compact,
        };
        if std::env::var("RUST_LOG").is_err() {
            let filter = env_filter(&config).unwrap();
            assert_eq!(filter.to_string(), "debug");
        }
    }

    #[test]
    fn test_init_pretty_logging_once() {
        let config = LoggingConfig {
            level: "banquito_core=debug".to_string(),
            format: LogFormat::Pretty,
        };
        assert!(init_logging(&config).is_ok());
        assert!(init_logging(&config).is_err());
    }
}
