//! Exponential backoff for fallible store access
//!
//! - [`BackoffPolicy`] computes capped exponential delays
//! - [`RetryExecutor`] drives a closure until it succeeds, fails
//!   permanently, runs out of attempts, is cancelled or hits its deadline
//! - [`RetryingConnector`] keeps one shared connection alive through a
//!   `Disconnected → Connecting → Connected` state machine

mod connector;
mod executor;
mod policy;

#[cfg(test)]
mod tests;

pub use connector::{Connect, ConnectorState, RetryingConnector};
pub use executor::{RetryError, RetryExecutor, Transient};
pub use policy::BackoffPolicy;
