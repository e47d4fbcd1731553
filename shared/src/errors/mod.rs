//! Shared error response structure handed to the boundary layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable failure payload
///
/// `error` is a stable code clients can branch on; `message` is human text
/// that never carries internal details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Subsystem that raised the error (authentication, role, token, store)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            target: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the raising subsystem
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Stable error codes
pub mod error_codes {
    pub const MISSING_ACCESS_TOKEN: &str = "MISSING_ACCESS_TOKEN";
    pub const MISSING_REFRESH_TOKEN: &str = "MISSING_REFRESH_TOKEN";
    pub const INVALID_ACCESS_TOKEN: &str = "INVALID_ACCESS_TOKEN";
    pub const INVALID_REFRESH_TOKEN: &str = "INVALID_REFRESH_TOKEN";
    pub const INVALID_ACCESS_TOKEN_FORMAT: &str = "INVALID_ACCESS_TOKEN_FORMAT";
    pub const INVALID_REFRESH_TOKEN_FORMAT: &str = "INVALID_REFRESH_TOKEN_FORMAT";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const INVALID_TOKEN_AUDIENCE: &str = "INVALID_TOKEN_AUDIENCE";
    pub const INSUFFICIENT_PERMISSIONS: &str = "INSUFFICIENT_PERMISSIONS";
    pub const TOKEN_ENCODING_ERROR: &str = "TOKEN_ENCODING_ERROR";
    pub const REVOCATION_STORE_UNAVAILABLE: &str = "REVOCATION_STORE_UNAVAILABLE";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

/// Result type with ErrorResponse as error
pub type ApiResult<T> = Result<T, ErrorResponse>;
