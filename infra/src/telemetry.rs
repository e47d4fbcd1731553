//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over [`LoggingConfig::level`] when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gk_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Build the level filter for `config`
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            InfrastructureError::Config(format!("Invalid log level '{}': {}", config.level, e))
        })
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = env_filter(config)?;
    let with_location = config.source_location;

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(with_location)
                    .with_line_number(with_location)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_file(with_location)
                    .with_line_number(with_location)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_file(with_location)
                    .with_line_number(with_location)
                    .with_target(true),
            )
            .try_init(),
    };

    installed.map_err(|e| {
        InfrastructureError::Config(format!("Tracing already initialized: {}", e))
    })?;

    tracing::info!(
        format = ?config.format,
        level = %config.level,
        "Logging initialized"
    );
    Ok(())
}
