//! Domain-specific error types and the boundary failure taxonomy.

mod auth_failure;
mod types;

#[cfg(test)]
mod tests;

pub use auth_failure::{AuthFailure, FailureTarget, StatusClass};
pub use types::{AuthError, StoreError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation {
            message: errors.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
