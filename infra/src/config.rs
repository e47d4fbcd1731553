//! Configuration loading
//!
//! Sources, later ones winning:
//! 1. built-in defaults ([`AppConfig::default`])
//! 2. `.env` in the working directory, if present
//! 3. `GATEKEEPER__*` environment variables, `__` separating nested keys
//!    (for example `GATEKEEPER__AUTH__SECRET`, `GATEKEEPER__CACHE__RETRY__MAX_ATTEMPTS`)

use ::config::{Config, Environment as EnvSource, Source};

use gk_shared::config::AppConfig;

use crate::InfrastructureError;

/// Prefix of environment variables read by [`load_config`]
pub const ENV_PREFIX: &str = "GATEKEEPER";

/// Load configuration from defaults, `.env` and the environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    load_config_from(
        EnvSource::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}

/// Load configuration from defaults overlaid with `source`
pub fn load_config_from<S>(source: S) -> Result<AppConfig, InfrastructureError>
where
    S: Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(source)
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    validate(&config)?;

    tracing::debug!(environment = %config.environment, "Configuration loaded");
    Ok(config)
}

/// Reject configurations that must never run
pub fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.auth.secret.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "auth.secret must not be empty".to_string(),
        ));
    }

    if config.environment.is_production() && config.auth.is_using_default_secret() {
        return Err(InfrastructureError::Config(
            "auth.secret must be set in production".to_string(),
        ));
    }

    if config.auth.is_using_default_secret() {
        tracing::warn!("Using the development signing secret");
    }

    Ok(())
}
