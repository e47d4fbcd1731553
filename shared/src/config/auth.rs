//! Token signing configuration

use serde::{Deserialize, Serialize};

/// Secret used when nothing else is configured. Refused in production.
pub const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// Audience embedded in and required of every token this system issues
pub const DEFAULT_AUDIENCE: &str = "gatekeeper:auth";

/// JWT configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing and verifying tokens
    pub secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_expiry")]
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds (also the revocation record TTL)
    #[serde(default = "default_refresh_expiry")]
    pub refresh_token_expiry: i64,

    /// Audience claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Signing algorithm name. Only symmetric HMAC algorithms are accepted.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            access_token_expiry: default_access_expiry(),
            refresh_token_expiry: default_refresh_expiry(),
            audience: default_audience(),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Override the audience claim
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

fn default_access_expiry() -> i64 {
    3600 // 1 hour
}

fn default_refresh_expiry() -> i64 {
    86400 // 1 day
}

fn default_audience() -> String {
    String::from(DEFAULT_AUDIENCE)
}

fn default_algorithm() -> String {
    String::from("HS256")
}
