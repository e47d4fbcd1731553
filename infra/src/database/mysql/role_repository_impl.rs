//! MySQL implementation of the RoleRepository trait.
//!
//! Roles live in the `roles` table; permissions are stored as a JSON array
//! of permission names.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gk_core::domain::entities::role::{Permission, Role};
use gk_core::errors::DomainError;
use gk_core::repositories::RoleRepository;

const SELECT_ROLE: &str =
    "SELECT id, name, CAST(permissions AS CHAR) AS permissions FROM roles";

/// MySQL implementation of RoleRepository
pub struct MySqlRoleRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRoleRepository {
    /// Create a new MySQL role repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Role entity
    fn row_to_role(row: &sqlx::mysql::MySqlRow) -> Result<Role, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| internal("Failed to get id", e))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| internal("Failed to get name", e))?;
        let permissions: String = row
            .try_get("permissions")
            .map_err(|e| internal("Failed to get permissions", e))?;

        Ok(Role {
            id: Uuid::parse_str(&id).map_err(|e| internal("Invalid role UUID", e))?,
            name,
            permissions: serde_json::from_str::<Vec<Permission>>(&permissions)
                .map_err(|e| internal("Invalid permissions JSON", e))?,
        })
    }

    fn encode_permissions(permissions: &[Permission]) -> Result<String, DomainError> {
        serde_json::to_string(permissions).map_err(|e| internal("Failed to encode permissions", e))
    }
}

fn internal(context: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}

/// Unique-key clashes become validation errors, everything else is internal
fn write_error(name: &str, error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return DomainError::Validation {
                message: format!("Role '{}' already exists", name),
            };
        }
    }
    internal("Failed to write role", error)
}

#[async_trait]
impl RoleRepository for MySqlRoleRepository {
    async fn get(&self, id: Uuid) -> Result<Option<Role>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_ROLE);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find role", e))?;

        row.as_ref().map(Self::row_to_role).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Role>, DomainError> {
        let query = format!("{} ORDER BY name", SELECT_ROLE);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list roles", e))?;

        rows.iter().map(Self::row_to_role).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let query = format!("{} WHERE name = ? LIMIT 1", SELECT_ROLE);

        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find role by name", e))?;

        row.as_ref().map(Self::row_to_role).transpose()
    }

    async fn create(&self, role: Role) -> Result<Role, DomainError> {
        sqlx::query("INSERT INTO roles (id, name, permissions) VALUES (?, ?, CAST(? AS JSON))")
            .bind(role.id.to_string())
            .bind(&role.name)
            .bind(Self::encode_permissions(&role.permissions)?)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(&role.name, e))?;

        Ok(role)
    }

    async fn update(&self, role: Role) -> Result<Option<Role>, DomainError> {
        // MySQL reports zero affected rows for a no-op update, so check existence first
        if self.get(role.id).await?.is_none() {
            return Ok(None);
        }

        sqlx::query("UPDATE roles SET name = ?, permissions = CAST(? AS JSON) WHERE id = ?")
            .bind(&role.name)
            .bind(Self::encode_permissions(&role.permissions)?)
            .bind(role.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(&role.name, e))?;

        Ok(Some(role))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete role", e))?;

        Ok(result.rows_affected() > 0)
    }
}
