pub mod revocation;
pub mod role;

pub use revocation::{MemoryRevocationStore, RevocationStore};
pub use role::RoleRepository;

#[cfg(test)]
pub use role::MockRoleRepository;
