//! Logging setup.
//!
//! Library code logs through the `log` facade. `init_logging` installs a
//! `tracing` subscriber and forwards `log` records into it, so both end up in
//! the same formatted output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global logger is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Builds the env filter: `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.level.clone(),
        reason: e.to_string(),
    })
}

/// Installs the global subscriber. Call once at process start.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;

    let result = match config.format {
        LogFormat::Pretty => {
            let subscriber = Registry::default()
                .with(filter)
                .with(fmt::layer().with_target(true));
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(filter)
                .with(fmt::layer().json().with_current_span(false));
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing_log::LogTracer::init().map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(format = ?config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_configured_level_used_without_env() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig {
            level: "docadmin=debug,sqlx=warn".to_string(),
            format: LogFormat::Pretty,
        };
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("docadmin=debug"));
    }

    #[test]
    #[serial]
    fn test_invalid_level_rejected() {
        std::env::remove_var("RUST_LOG");
        let config = LoggingConfig {
            level: "docadmin=notalevel".to_string(),
            format: LogFormat::Json,
        };
        assert!(matches!(
            build_filter(&config),
            Err(TelemetryError::InvalidFilter { .. })
        ));
    }
}
