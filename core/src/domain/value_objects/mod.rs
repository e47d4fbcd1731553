//! Value objects representing immutable domain concepts.

pub mod role_set;

pub use role_set::RoleSet;
