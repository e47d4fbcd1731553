//! Domain entities representing core business objects.

pub mod role;
pub mod token;

pub use role::{Permission, Role, RoleCreate, RoleUpdate};
pub use token::{Claims, TokenKind, TokenPair};
