//! Main token service implementation

use std::time::Duration;

use constant_time_eq::constant_time_eq;
use tracing::{debug, info, warn};

use gk_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::domain::value_objects::RoleSet;
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::config::TokenServiceConfig;
use super::signer::TokenSigner;

/// Key prefix of refresh-token records
pub const REFRESH_KEY_PREFIX: &str = "refresh_token:";

/// Revocation store key holding `identity`'s refresh token
pub fn refresh_key(identity: &str) -> String {
    format!("{}{}", REFRESH_KEY_PREFIX, identity)
}

/// Service for issuing, verifying and rotating tokens
pub struct TokenService<S: RevocationStore> {
    store: S,
    signer: TokenSigner,
    config: TokenServiceConfig,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a new token service from the shared JWT configuration
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store holding refresh-token records
    /// * `jwt` - Secret, lifetimes, audience and algorithm
    pub fn new(store: S, jwt: &JwtConfig) -> Result<Self, DomainError> {
        let config = TokenServiceConfig::from_jwt(jwt)?;
        let signer = TokenSigner::new(jwt.secret.as_bytes(), config.algorithm, &config.audience)?;
        Ok(Self::with_signer(store, signer, config))
    }

    /// Creates a token service around an existing signer
    pub fn with_signer(store: S, signer: TokenSigner, config: TokenServiceConfig) -> Self {
        Self {
            store,
            signer,
            config,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Claims for a fresh access token
    pub fn access_claims(&self, identity: &str, roles: RoleSet) -> Claims {
        Claims::access(identity, roles, &self.config.audience, self.config.access_token_ttl)
    }

    /// Claims for a fresh refresh token
    pub fn refresh_claims(&self, identity: &str) -> Claims {
        Claims::refresh(identity, &self.config.audience, self.config.refresh_token_ttl)
    }

    /// Signs `claims` into a compact token
    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        self.signer.sign(claims)
    }

    /// Verifies signature, audience and expiry and returns the claims
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        self.signer.verify(token)
    }

    /// Decodes `token` and checks it is structurally a `kind` token
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Verified claims with a subject, and roles for access tokens
    /// * `Err(TokenError::WrongTokenKind)` - a present `typ` contradicts `kind`
    /// * `Err(TokenError::MissingClaim)` - Empty subject, or an access token without roles
    pub fn decode_as(&self, token: &str, kind: TokenKind) -> Result<Claims, DomainError> {
        let claims = self.decode(token)?;

        if !claims.is_kind(kind) {
            return Err(TokenError::WrongTokenKind { expected: kind }.into());
        }
        if claims.sub.trim().is_empty() {
            return Err(TokenError::MissingClaim { claim: "sub" }.into());
        }
        if kind == TokenKind::Access && claims.roles().is_none() {
            return Err(TokenError::MissingClaim { claim: "role" }.into());
        }

        Ok(claims)
    }

    /// Whether `token` is the refresh token currently on record for `identity`
    ///
    /// A missing or different record yields `Ok(false)`. A store outage is an
    /// error, never a verdict.
    pub async fn validate_refresh(&self, token: &str, identity: &str) -> Result<bool, DomainError> {
        let stored = self.store.get(&refresh_key(identity)).await?;

        let valid = match stored {
            Some(stored) => constant_time_eq(stored.as_bytes(), token.as_bytes()),
            None => false,
        };

        if !valid {
            debug!(identity = %identity, "Presented refresh token is not on record");
        }
        Ok(valid)
    }

    /// Records `token` as `identity`'s only valid refresh token
    pub async fn store_refresh(
        &self,
        identity: &str,
        token: &str,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        self.store
            .set_with_expiry(&refresh_key(identity), token, ttl)
            .await?;
        debug!(identity = %identity, ttl_secs = ttl.as_secs(), "Stored refresh token");
        Ok(())
    }

    /// Deletes `identity`'s refresh record; a missing record is not an error
    pub async fn revoke_refresh(&self, identity: &str) -> Result<(), DomainError> {
        self.store.delete(&refresh_key(identity)).await?;
        info!(identity = %identity, "Revoked refresh token");
        Ok(())
    }

    /// Mints an access/refresh pair and records the refresh token
    pub async fn issue_tokens(
        &self,
        identity: &str,
        roles: RoleSet,
    ) -> Result<TokenPair, DomainError> {
        if identity.trim().is_empty() {
            return Err(TokenError::MissingClaim { claim: "sub" }.into());
        }
        if roles.is_empty() {
            return Err(TokenError::MissingClaim { claim: "role" }.into());
        }

        let access_token = self.encode(&self.access_claims(identity, roles))?;
        let refresh_token = self.encode(&self.refresh_claims(identity))?;

        self.store_refresh(identity, &refresh_token, self.config.refresh_record_ttl())
            .await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl.num_seconds(),
            self.config.refresh_token_ttl.num_seconds(),
        ))
    }

    /// Exchanges a valid refresh token for a new pair, invalidating the old one
    pub async fn refresh_tokens(
        &self,
        refresh_token: &str,
        roles: RoleSet,
    ) -> Result<TokenPair, DomainError> {
        let claims = self.decode_as(refresh_token, TokenKind::Refresh)?;

        if !self.validate_refresh(refresh_token, &claims.sub).await? {
            warn!(identity = %claims.sub, "Rejected refresh with a token that is not on record");
            return Err(TokenError::RefreshTokenRevoked.into());
        }

        self.issue_tokens(&claims.sub, roles).await
    }
}
