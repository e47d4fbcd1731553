//! Role repository trait defining the interface for role persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::role::Role;
use crate::errors::DomainError;

/// Repository trait for Role entity persistence operations
///
/// Role names are unique; `create` and `update` report a clash as
/// `DomainError::Validation`.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find a role by id
    ///
    /// # Returns
    /// * `Ok(Some(Role))` - Role found
    /// * `Ok(None)` - No role with that id
    /// * `Err(DomainError)` - Database error occurred
    async fn get(&self, id: Uuid) -> Result<Option<Role>, DomainError>;

    /// List every role, ordered by name
    async fn get_all(&self) -> Result<Vec<Role>, DomainError>;

    /// Find a role by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;

    /// Persist a new role
    async fn create(&self, role: Role) -> Result<Role, DomainError>;

    /// Replace an existing role's name and permissions
    ///
    /// # Returns
    /// * `Ok(Some(Role))` - The updated role
    /// * `Ok(None)` - No role with that id
    async fn update(&self, role: Role) -> Result<Option<Role>, DomainError>;

    /// Delete a role
    ///
    /// # Returns
    /// * `Ok(true)` - Role deleted
    /// * `Ok(false)` - No role with that id
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
