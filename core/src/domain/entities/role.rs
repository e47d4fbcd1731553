//! Role entity and its create/update payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use gk_shared::utils::validation::is_valid_role_name;

/// Closed set of permissions a role can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Read,
    Write,
    Delete,
    ManageUsers,
    ManageRoles,
}

impl Permission {
    pub const ALL: [Permission; 5] = [
        Permission::Read,
        Permission::Write,
        Permission::Delete,
        Permission::ManageUsers,
        Permission::ManageRoles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Delete => "delete",
            Permission::ManageUsers => "manage_users",
            Permission::ManageRoles => "manage_roles",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| format!("Unknown permission: {}", s))
    }
}

/// A named bundle of permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Creates a new role with a fresh id
    pub fn new(name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            permissions: normalize(permissions),
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Applies the fields present in `update`
    pub fn apply(&mut self, update: RoleUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(permissions) = update.permissions {
            self.permissions = normalize(permissions);
        }
    }
}

impl From<RoleCreate> for Role {
    fn from(payload: RoleCreate) -> Self {
        Role::new(payload.name, payload.permissions)
    }
}

fn normalize(mut permissions: Vec<Permission>) -> Vec<Permission> {
    permissions.sort();
    permissions.dedup();
    permissions
}

fn validate_role_name(name: &str) -> Result<(), ValidationError> {
    if !is_valid_role_name(name) {
        let mut error = ValidationError::new("role_name");
        error.message = Some(
            "Role name must be 1-64 characters without surrounding whitespace or commas".into(),
        );
        return Err(error);
    }
    Ok(())
}

/// Payload for creating a role
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleCreate {
    #[validate(custom = "validate_role_name")]
    pub name: String,

    #[validate(length(min = 1, message = "Permissions can't be empty"))]
    pub permissions: Vec<Permission>,
}

/// Payload for updating a role; omitted fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RoleUpdate {
    #[validate(custom = "validate_role_name")]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Permissions can't be empty"))]
    pub permissions: Option<Vec<Permission>>,
}
