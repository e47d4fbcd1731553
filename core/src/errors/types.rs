//! Error types for token handling, authorization and the revocation store

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Authentication and authorization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{kind} token is missing")]
    MissingToken { kind: TokenKind },

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token encoding and validation errors
///
/// Expiry, audience and structural failures are kept apart because the
/// boundary layer remediates them differently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token audience")]
    InvalidAudience,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token decoding failed: {reason}")]
    DecodeFailure { reason: String },

    #[error("Token encoding failed")]
    EncodingFailed,

    #[error("Unsupported signing algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: &'static str },

    #[error("Expected a {expected} token")]
    WrongTokenKind { expected: TokenKind },

    #[error("Refresh token is not the one on record")]
    RefreshTokenRevoked,
}

/// Revocation store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connectivity failure; worth retrying
    #[error("Revocation store connection failed: {message}")]
    Connection { message: String },

    /// The store rejected the command; retrying will not help
    #[error("Revocation store command failed: {message}")]
    Command { message: String },

    #[error("Revocation store unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },

    #[error("Revocation store operation timed out")]
    TimedOut,

    #[error("Revocation store operation cancelled")]
    Cancelled,
}

impl StoreError {
    /// Whether the error describes a connectivity problem
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Connection { .. })
    }
}
