//! Role management and default role seeding

mod service;


pub use service::{EnsureOutcome, RoleService, DEFAULT_ROLES};
