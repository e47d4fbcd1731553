//! Business services containing domain logic and use cases.

pub mod access;
pub mod auth;
pub mod backoff;
pub mod role;
pub mod token;

// Re-export commonly used types
pub use access::{authorize, AccessGuard, MatchMode};
pub use auth::SessionAuthenticator;
pub use backoff::{
    BackoffPolicy, Connect, ConnectorState, RetryError, RetryExecutor, RetryingConnector, Transient,
};
pub use role::{EnsureOutcome, RoleService, DEFAULT_ROLES};
pub use token::{refresh_key, TokenService, TokenServiceConfig, TokenSigner, REFRESH_KEY_PREFIX};
