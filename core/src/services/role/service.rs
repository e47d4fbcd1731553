//! CRUD over role records

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::role::{Permission, Role, RoleCreate, RoleUpdate};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::RoleRepository;

/// Role catalogue seeded at startup, with the permissions each role grants
pub const DEFAULT_ROLES: [(&str, &[Permission]); 4] = [
    ("user", &[Permission::Read]),
    ("moderator", &[Permission::Read, Permission::Write, Permission::Delete]),
    (
        "admin",
        &[
            Permission::Read,
            Permission::Write,
            Permission::Delete,
            Permission::ManageUsers,
        ],
    ),
    (
        "superuser",
        &[
            Permission::Read,
            Permission::Write,
            Permission::Delete,
            Permission::ManageUsers,
            Permission::ManageRoles,
        ],
    ),
];

/// Result of an idempotent seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created(Role),
    AlreadyExists(Role),
}

impl EnsureOutcome {
    pub fn role(&self) -> &Role {
        match self {
            EnsureOutcome::Created(role) | EnsureOutcome::AlreadyExists(role) => role,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, EnsureOutcome::Created(_))
    }
}

/// Role management service
pub struct RoleService<R: RoleRepository> {
    repository: Arc<R>,
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Role> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Role>> {
        self.repository.get_all().await
    }

    /// Creates a role after validating the payload
    pub async fn create(&self, payload: RoleCreate) -> DomainResult<Role> {
        payload.validate()?;

        let role = self.repository.create(Role::from(payload)).await?;
        info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Applies the present fields of `payload`; an explicit empty permission list is rejected
    pub async fn update(&self, id: Uuid, payload: RoleUpdate) -> DomainResult<Role> {
        payload.validate()?;

        let mut role = self.get(id).await?;
        role.apply(payload);

        let role = self
            .repository
            .update(role)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(role_id = %role.id, name = %role.name, "Role updated");
        Ok(role)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        info!(role_id = %id, "Role deleted");
        Ok(())
    }

    /// Creates the role unless one with the same name exists
    pub async fn ensure_role(
        &self,
        name: &str,
        permissions: &[Permission],
    ) -> DomainResult<EnsureOutcome> {
        if let Some(existing) = self.repository.find_by_name(name).await? {
            return Ok(EnsureOutcome::AlreadyExists(existing));
        }

        let role = self
            .create(RoleCreate {
                name: name.to_string(),
                permissions: permissions.to_vec(),
            })
            .await?;
        Ok(EnsureOutcome::Created(role))
    }

    /// Seeds [`DEFAULT_ROLES`]
    pub async fn ensure_default_roles(&self) -> DomainResult<Vec<EnsureOutcome>> {
        let mut outcomes = Vec::with_capacity(DEFAULT_ROLES.len());
        for (name, permissions) in DEFAULT_ROLES {
            outcomes.push(self.ensure_role(name, permissions).await?);
        }

        let created = outcomes.iter().filter(|outcome| outcome.was_created()).count();
        info!(created, total = outcomes.len(), "Default roles ensured");
        Ok(outcomes)
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        resource: format!("role {}", id),
    }
}
