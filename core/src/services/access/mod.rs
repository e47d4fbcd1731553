//! Role-based access control

mod guard;

pub use guard::{authorize, AccessGuard, MatchMode};
