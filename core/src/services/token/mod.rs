//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HMAC signing and verification of access and refresh tokens
//! - Structural checks for the declared token kind
//! - The server-side refresh-token record (store, validate, rotate, revoke)

mod config;
mod service;
mod signer;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{refresh_key, TokenService, REFRESH_KEY_PREFIX};
pub use signer::TokenSigner;
