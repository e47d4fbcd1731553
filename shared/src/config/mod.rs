//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing configuration
//! - `cache` - revocation store and retry policy configuration
//! - `database` - role store connection pool configuration
//! - `environment` - environment detection and logging configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{JwtConfig, DEFAULT_AUDIENCE, DEVELOPMENT_SECRET};
pub use cache::{BackoffConfig, CacheConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
///
/// Built once at startup and handed to each component constructor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Token signing configuration
    #[serde(default)]
    pub auth: JwtConfig,

    /// Revocation store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Role store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            auth: JwtConfig::default(),
            cache: CacheConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            auth: JwtConfig::new("use-env-variable"),
            cache: CacheConfig::default(),
            database: DatabaseConfig::default().with_max_connections(50),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_round_trips_through_json() {
        let config = AppConfig::production();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.environment, Environment::Production);
        assert_eq!(back.database.max_connections, 50);
        assert_eq!(back.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_app_config_empty_object_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(config.environment.is_development());
        assert!(config.auth.is_using_default_secret());
    }
}
