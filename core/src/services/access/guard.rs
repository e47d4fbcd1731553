//! Role guards evaluated against verified claims

use tracing::debug;

use crate::domain::entities::token::Claims;
use crate::domain::value_objects::RoleSet;
use crate::errors::{AuthError, DomainError, TokenError};

/// How required roles are matched against the subject's roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// At least one required role is held
    Any,
    /// Every required role is held
    All,
}

/// Set-based authorization decision; an empty set on either side denies
pub fn authorize(subject: &RoleSet, required: &RoleSet, mode: MatchMode) -> bool {
    if subject.is_empty() || required.is_empty() {
        return false;
    }
    match mode {
        MatchMode::Any => subject.intersects(required),
        MatchMode::All => subject.is_superset_of(required),
    }
}

/// Required roles for a protected operation
///
/// Guards are plain values built when routes are registered and invoked
/// explicitly with the caller's claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    required: RoleSet,
    mode: MatchMode,
}

impl AccessGuard {
    /// Allows callers holding any of `roles`
    pub fn any_of<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: roles.into_iter().collect(),
            mode: MatchMode::Any,
        }
    }

    /// Allows callers holding all of `roles`
    pub fn all_of<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: roles.into_iter().collect(),
            mode: MatchMode::All,
        }
    }

    pub fn admin() -> Self {
        Self::any_of(["admin"])
    }

    pub fn superuser() -> Self {
        Self::any_of(["superuser", "admin"])
    }

    pub fn moderator() -> Self {
        Self::any_of(["moderator", "admin"])
    }

    pub fn authenticated() -> Self {
        Self::any_of(["user", "moderator", "admin", "superuser"])
    }

    pub fn required(&self) -> &RoleSet {
        &self.required
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn allows(&self, roles: &RoleSet) -> bool {
        authorize(roles, &self.required, self.mode)
    }

    /// Checks verified claims against this guard
    ///
    /// Claims without roles are a structural token error, not a denial.
    pub fn check(&self, claims: &Claims) -> Result<(), DomainError> {
        let roles = claims
            .roles()
            .ok_or(TokenError::MissingClaim { claim: "role" })?;

        if self.allows(roles) {
            Ok(())
        } else {
            debug!(
                identity = %claims.sub,
                held = %roles,
                required = %self.required,
                "Access denied"
            );
            Err(AuthError::InsufficientPermissions.into())
        }
    }
}
