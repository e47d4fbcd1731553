//! Domain layer containing entities and value objects.

pub mod entities;
pub mod value_objects;

pub use entities::{Claims, Permission, Role, RoleCreate, RoleUpdate, TokenKind, TokenPair};
pub use value_objects::RoleSet;
