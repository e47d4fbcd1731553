//! Converts presented credentials into verified claims or an [`AuthFailure`]

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::domain::value_objects::RoleSet;
use crate::errors::{AuthFailure, DomainError, TokenError};
use crate::repositories::RevocationStore;
use crate::services::access::AccessGuard;
use crate::services::token::TokenService;

/// Authentication facade used by request handlers
///
/// Handlers pass the raw credential of the declared kind (usually read
/// from the cookie named by [`TokenKind::cookie_name`]) and receive either
/// verified claims or a structured failure.
pub struct SessionAuthenticator<S: RevocationStore> {
    tokens: Arc<TokenService<S>>,
}

impl<S: RevocationStore> Clone for SessionAuthenticator<S> {
    fn clone(&self) -> Self {
        Self {
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<S: RevocationStore> SessionAuthenticator<S> {
    pub fn new(tokens: Arc<TokenService<S>>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenService<S> {
        &self.tokens
    }

    /// Verifies a credential of the declared kind
    ///
    /// An absent or empty credential yields `MISSING_<KIND>_TOKEN`.
    pub fn authenticate(
        &self,
        token: Option<&str>,
        kind: TokenKind,
    ) -> Result<Claims, AuthFailure> {
        let token = present(token, kind)?;

        self.tokens
            .decode_as(token, kind)
            .map_err(|err| reject(&err, kind))
    }

    /// Verifies a refresh credential and confirms it is the one on record
    pub async fn authenticate_refresh(&self, token: Option<&str>) -> Result<Claims, AuthFailure> {
        let claims = self.authenticate(token, TokenKind::Refresh)?;
        let token = present(token, TokenKind::Refresh)?;

        match self.tokens.validate_refresh(token, &claims.sub).await {
            Ok(true) => Ok(claims),
            Ok(false) => Err(reject(
                &DomainError::Token(TokenError::RefreshTokenRevoked),
                TokenKind::Refresh,
            )),
            Err(err) => Err(reject(&err, TokenKind::Refresh)),
        }
    }

    /// Verifies an access credential and runs `guard` on its claims
    pub fn authorize(
        &self,
        token: Option<&str>,
        guard: &AccessGuard,
    ) -> Result<Claims, AuthFailure> {
        let claims = self.authenticate(token, TokenKind::Access)?;

        guard
            .check(&claims)
            .map_err(|err| reject(&err, TokenKind::Access))?;
        Ok(claims)
    }

    /// Issues a session for an identity whose credentials were checked elsewhere
    pub async fn login(&self, identity: &str, roles: RoleSet) -> Result<TokenPair, AuthFailure> {
        let pair = self
            .tokens
            .issue_tokens(identity, roles)
            .await
            .map_err(|err| reject(&err, TokenKind::Access))?;

        info!(identity = %identity, "Session issued");
        Ok(pair)
    }

    /// Rotates the session behind a refresh credential
    pub async fn refresh(
        &self,
        token: Option<&str>,
        roles: RoleSet,
    ) -> Result<TokenPair, AuthFailure> {
        let token = present(token, TokenKind::Refresh)?;

        self.tokens
            .refresh_tokens(token, roles)
            .await
            .map_err(|err| reject(&err, TokenKind::Refresh))
    }

    /// Ends the session by deleting the refresh record
    pub async fn logout(&self, identity: &str) -> Result<(), AuthFailure> {
        self.tokens
            .revoke_refresh(identity)
            .await
            .map_err(|err| reject(&err, TokenKind::Refresh))?;

        info!(identity = %identity, "Session ended");
        Ok(())
    }
}

fn present(token: Option<&str>, kind: TokenKind) -> Result<&str, AuthFailure> {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => {
            debug!(kind = %kind, "No credential presented");
            Err(AuthFailure::missing_token(kind))
        }
    }
}

fn reject(error: &DomainError, kind: TokenKind) -> AuthFailure {
    let failure = AuthFailure::from_domain(error, kind);

    if failure.is_server_fault() {
        warn!(code = failure.code, error = %error, "Authentication could not be completed");
    } else {
        debug!(code = failure.code, kind = %kind, "Credential rejected");
    }
    failure
}
