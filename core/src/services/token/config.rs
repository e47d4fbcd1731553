//! Configuration for the token service

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use gk_shared::config::{JwtConfig, DEFAULT_AUDIENCE};

use crate::errors::{DomainError, TokenError};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Audience embedded in and required of every token
    pub audience: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime, also the revocation record TTL
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
            audience: DEFAULT_AUDIENCE.to_string(),
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(1),
        }
    }
}

impl TokenServiceConfig {
    /// Build from the shared JWT configuration
    pub fn from_jwt(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| {
            TokenError::UnsupportedAlgorithm {
                name: config.algorithm.clone(),
            }
        })?;

        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(TokenError::UnsupportedAlgorithm {
                name: config.algorithm.clone(),
            }
            .into());
        }

        if config.access_token_expiry <= 0 || config.refresh_token_expiry <= 0 {
            return Err(DomainError::Validation {
                message: "Token lifetimes must be positive".to_string(),
            });
        }

        Ok(Self {
            algorithm,
            audience: config.audience.clone(),
            access_token_ttl: Duration::seconds(config.access_token_expiry),
            refresh_token_ttl: Duration::seconds(config.refresh_token_expiry),
        })
    }

    /// Refresh lifetime as a store TTL
    pub fn refresh_record_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_token_ttl.num_seconds().max(1) as u64)
    }
}
