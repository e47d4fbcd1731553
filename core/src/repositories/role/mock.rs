//! Mock implementation of RoleRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::role::Role;
use crate::errors::DomainError;

use super::r#trait::RoleRepository;

/// Mock role repository for testing
#[derive(Clone, Default)]
pub struct MockRoleRepository {
    roles: Arc<RwLock<HashMap<Uuid, Role>>>,
}

impl MockRoleRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored roles
    pub async fn count(&self) -> usize {
        self.roles.read().await.len()
    }

    fn name_taken(roles: &HashMap<Uuid, Role>, name: &str, except: Option<Uuid>) -> bool {
        roles
            .values()
            .any(|role| role.name == name && Some(role.id) != except)
    }
}

#[async_trait]
impl RoleRepository for MockRoleRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        Ok(self.roles.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Role>, DomainError> {
        let mut roles: Vec<Role> = self.roles.read().await.values().cloned().collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|role| role.name == name).cloned())
    }

    async fn create(&self, role: Role) -> Result<Role, DomainError> {
        let mut roles = self.roles.write().await;

        if Self::name_taken(&roles, &role.name, None) {
            return Err(DomainError::Validation {
                message: format!("Role '{}' already exists", role.name),
            });
        }

        roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, role: Role) -> Result<Option<Role>, DomainError> {
        let mut roles = self.roles.write().await;

        if !roles.contains_key(&role.id) {
            return Ok(None);
        }
        if Self::name_taken(&roles, &role.name, Some(role.id)) {
            return Err(DomainError::Validation {
                message: format!("Role '{}' already exists", role.name),
            });
        }

        roles.insert(role.id, role.clone());
        Ok(Some(role))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.roles.write().await.remove(&id).is_some())
    }
}
