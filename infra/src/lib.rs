//! # Infrastructure Layer
//!
//! Concrete implementations behind the contracts of `gk_core`:
//! - **Cache**: Redis-backed refresh-token revocation store
//! - **Database**: MySQL role repository using SQLx
//! - **Config**: layered configuration loading
//! - **Telemetry**: `tracing` subscriber setup
//! - **Bootstrap**: builds and tears down the runtime services once

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod database;
pub mod telemetry;

pub use bootstrap::AuthRuntime;
pub use cache::RedisRevocationStore;
pub use crate::config::{load_config, load_config_from};
pub use database::{DatabasePool, MySqlRoleRepository};
pub use telemetry::init_tracing;

use gk_core::errors::{DomainError, StoreError};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error outside the revocation store path
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Revocation store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Domain failure while wiring services
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration source or deserialization error
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
