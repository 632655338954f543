//! Role repository trait (port)

use async_trait::async_trait;

use crate::domain::{NewRole, Role};
use crate::error::DomainError;

/// Result of a guarded role deletion (see [`GroupDeleteOutcome`] for the
/// atomicity contract).
///
/// [`GroupDeleteOutcome`]: crate::repositories::GroupDeleteOutcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDeleteOutcome {
    Deleted,
    NotFound,
    InUse,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Role>, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Role>, DomainError>;
    async fn add(&self, role: &NewRole) -> Result<Role, DomainError>;
    async fn update(&self, role: &Role) -> Result<(), DomainError>;
    async fn exists(&self, id: i64) -> Result<bool, DomainError>;
    /// Deletes only when no group-role link references the role.
    async fn delete_if_unreferenced(&self, id: i64) -> Result<RoleDeleteOutcome, DomainError>;
}
