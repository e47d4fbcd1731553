//! # Gatekeeper Core
//!
//! Token lifecycle and permission-checking engine.
//! This crate contains domain entities, the token service, role guards,
//! retry/backoff primitives, repository contracts and the error taxonomy
//! consumed by the boundary layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, Permission, Role, RoleCreate, RoleSet, RoleUpdate, TokenKind, TokenPair};
pub use errors::{
    AuthError, AuthFailure, DomainError, DomainResult, FailureTarget, StatusClass, StoreError,
    TokenError,
};
pub use repositories::{MemoryRevocationStore, RevocationStore, RoleRepository};
pub use services::{
    AccessGuard, BackoffPolicy, EnsureOutcome, RetryingConnector, RoleService,
    SessionAuthenticator, TokenService,
};
