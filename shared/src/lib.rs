//! Shared configuration and wire types for the Gatekeeper workspace
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (JWT, revocation store, retry policy, database, logging)
//! - The machine-readable error response handed to the boundary layer
//! - Validation helpers for role names

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackoffConfig, CacheConfig, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use utils::validation;
