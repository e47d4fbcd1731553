//! Token entities for JWT-based authentication.

use std::fmt;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::RoleSet;

/// Kind of credential a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    /// Capitalized form for client-facing messages
    pub fn title(self) -> &'static str {
        match self {
            TokenKind::Access => "Access",
            TokenKind::Refresh => "Refresh",
        }
    }

    /// Name of the cookie the token travels in
    pub fn cookie_name(self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identity)
    pub sub: String,

    /// Audience
    pub aud: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID; empty on tokens minted by issuers that omit it
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jti: String,

    /// Token kind. Absent on tokens from issuers that leave the kind to the
    /// verifying caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<TokenKind>,

    /// Role names; present on access tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleSet>,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `subject` - The user identity
    /// * `roles` - Role names granted to the subject
    /// * `audience` - Audience the token is issued for
    /// * `lifetime` - Time until the token expires
    pub fn access(
        subject: impl Into<String>,
        roles: RoleSet,
        audience: &str,
        lifetime: Duration,
    ) -> Self {
        Self::issue(subject.into(), TokenKind::Access, Some(roles), audience, lifetime)
    }

    /// Creates new claims for a refresh token
    pub fn refresh(subject: impl Into<String>, audience: &str, lifetime: Duration) -> Self {
        Self::issue(subject.into(), TokenKind::Refresh, None, audience, lifetime)
    }

    fn issue(
        sub: String,
        typ: TokenKind,
        role: Option<RoleSet>,
        audience: &str,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub,
            aud: audience.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
            typ: Some(typ),
            role,
        }
    }

    /// Checks if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Role names carried by the token, if any
    pub fn roles(&self) -> Option<&RoleSet> {
        self.role.as_ref().filter(|roles| !roles.is_empty())
    }

    /// Whether the claims may be used as a `kind` token
    ///
    /// A missing `typ` defers to the caller; a present one must match.
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.typ.map_or(true, |typ| typ == kind)
    }

    /// Parses the subject as a UUID
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned on login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub access_expires_in: i64,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
