//! Structured failure signals handed to the boundary layer
//!
//! Every domain failure that can surface while authenticating or
//! authorizing a request is converted into an [`AuthFailure`]: a status
//! class, a stable machine-readable code, a client-safe message and the
//! subsystem that raised it.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use gk_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};

use crate::domain::entities::token::TokenKind;

use super::{AuthError, DomainError, StoreError, TokenError};

/// Transport-neutral status class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerFault,
    ServiceUnavailable,
}

impl StatusClass {
    /// HTTP status code equivalent
    pub fn http_status(self) -> u16 {
        match self {
            StatusClass::BadRequest => 400,
            StatusClass::Unauthorized => 401,
            StatusClass::Forbidden => 403,
            StatusClass::NotFound => 404,
            StatusClass::ServerFault => 500,
            StatusClass::ServiceUnavailable => 503,
        }
    }
}

/// Subsystem that raised the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureTarget {
    Authentication,
    Role,
    Token,
    Store,
}

impl FailureTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureTarget::Authentication => "authentication",
            FailureTarget::Role => "role",
            FailureTarget::Token => "token",
            FailureTarget::Store => "store",
        }
    }
}

impl fmt::Display for FailureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable authentication/authorization failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct AuthFailure {
    pub status: StatusClass,
    pub message: String,
    pub code: &'static str,
    pub target: FailureTarget,
}

impl AuthFailure {
    pub fn new(
        status: StatusClass,
        code: &'static str,
        message: impl Into<String>,
        target: FailureTarget,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            target,
        }
    }

    /// No credential of the given kind was presented
    pub fn missing_token(kind: TokenKind) -> Self {
        let code = match kind {
            TokenKind::Access => error_codes::MISSING_ACCESS_TOKEN,
            TokenKind::Refresh => error_codes::MISSING_REFRESH_TOKEN,
        };
        Self::new(
            StatusClass::Unauthorized,
            code,
            format!("{} token is missing", kind.title()),
            FailureTarget::Authentication,
        )
    }

    /// Maps a token error raised while handling a token of `kind`
    pub fn from_token_error(error: &TokenError, kind: TokenKind) -> Self {
        let (invalid, invalid_format) = match kind {
            TokenKind::Access => (
                error_codes::INVALID_ACCESS_TOKEN,
                error_codes::INVALID_ACCESS_TOKEN_FORMAT,
            ),
            TokenKind::Refresh => (
                error_codes::INVALID_REFRESH_TOKEN,
                error_codes::INVALID_REFRESH_TOKEN_FORMAT,
            ),
        };

        match error {
            TokenError::TokenExpired => Self::new(
                StatusClass::Unauthorized,
                error_codes::TOKEN_EXPIRED,
                "Token expired",
                FailureTarget::Token,
            ),
            TokenError::InvalidAudience => Self::new(
                StatusClass::Unauthorized,
                error_codes::INVALID_TOKEN_AUDIENCE,
                "Invalid token audience",
                FailureTarget::Token,
            ),
            TokenError::MalformedToken
            | TokenError::DecodeFailure { .. }
            | TokenError::WrongTokenKind { .. } => Self::new(
                StatusClass::Unauthorized,
                invalid,
                format!("Invalid {} token", kind),
                FailureTarget::Token,
            ),
            TokenError::MissingClaim { claim } => {
                let message = if *claim == "role" {
                    format!("{} token missing role information", kind.title())
                } else {
                    format!("{} token missing user identifier", kind.title())
                };
                Self::new(
                    StatusClass::Unauthorized,
                    invalid_format,
                    message,
                    FailureTarget::Token,
                )
            }
            TokenError::RefreshTokenRevoked => Self::new(
                StatusClass::Unauthorized,
                error_codes::INVALID_REFRESH_TOKEN,
                "Invalid or expired refresh token",
                FailureTarget::Token,
            ),
            TokenError::EncodingFailed | TokenError::UnsupportedAlgorithm { .. } => Self::new(
                StatusClass::ServerFault,
                error_codes::TOKEN_ENCODING_ERROR,
                "Token encoding error",
                FailureTarget::Token,
            ),
        }
    }

    /// Maps a domain error raised while handling a token of `kind`
    pub fn from_domain(error: &DomainError, kind: TokenKind) -> Self {
        match error {
            DomainError::Token(token_error) => Self::from_token_error(token_error, kind),
            other => Self::from(other),
        }
    }

    /// Whether the caller should re-authenticate
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusClass::Unauthorized
    }

    /// Whether the failure is the server's fault rather than the caller's
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self.status,
            StatusClass::ServerFault | StatusClass::ServiceUnavailable
        )
    }
}

impl From<&AuthError> for AuthFailure {
    fn from(error: &AuthError) -> Self {
        match error {
            AuthError::MissingToken { kind } => Self::missing_token(*kind),
            AuthError::InsufficientPermissions => Self::new(
                StatusClass::Forbidden,
                error_codes::INSUFFICIENT_PERMISSIONS,
                "Insufficient permissions",
                FailureTarget::Role,
            ),
        }
    }
}

impl From<&StoreError> for AuthFailure {
    fn from(error: &StoreError) -> Self {
        match error {
            StoreError::Command { .. } => Self::new(
                StatusClass::ServerFault,
                error_codes::INTERNAL_ERROR,
                "Internal server error",
                FailureTarget::Store,
            ),
            StoreError::Connection { .. }
            | StoreError::Unavailable { .. }
            | StoreError::TimedOut
            | StoreError::Cancelled => Self::new(
                StatusClass::ServiceUnavailable,
                error_codes::REVOCATION_STORE_UNAVAILABLE,
                "Authentication service temporarily unavailable",
                FailureTarget::Store,
            ),
        }
    }
}

impl From<&DomainError> for AuthFailure {
    fn from(error: &DomainError) -> Self {
        match error {
            DomainError::Token(token_error) => {
                Self::from_token_error(token_error, TokenKind::Access)
            }
            DomainError::Auth(auth_error) => Self::from(auth_error),
            DomainError::Store(store_error) => Self::from(store_error),
            DomainError::Validation { message } => Self::new(
                StatusClass::BadRequest,
                error_codes::VALIDATION_ERROR,
                message.clone(),
                FailureTarget::Role,
            ),
            DomainError::NotFound { .. } => Self::new(
                StatusClass::NotFound,
                error_codes::NOT_FOUND,
                "Resource not found",
                FailureTarget::Role,
            ),
            DomainError::Internal { .. } => Self::new(
                StatusClass::ServerFault,
                error_codes::INTERNAL_ERROR,
                "Internal server error",
                FailureTarget::Authentication,
            ),
        }
    }
}

impl From<DomainError> for AuthFailure {
    fn from(error: DomainError) -> Self {
        Self::from(&error)
    }
}

impl IntoErrorResponse for AuthFailure {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code, self.message.clone()).with_target(self.target.as_str())
    }
}
