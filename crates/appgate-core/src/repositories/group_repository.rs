//! Group repository trait (port)

use async_trait::async_trait;

use crate::domain::{Group, NewGroup};
use crate::error::DomainError;

/// Result of a guarded group deletion. The dependency checks and the
/// delete must execute as one atomic unit of work at the storage
/// boundary, so the outcome is reported by the gateway rather than
/// re-derived from separate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDeleteOutcome {
    Deleted,
    NotFound,
    HasApplications,
    HasRoles,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Group>, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Group>, DomainError>;
    async fn add(&self, group: &NewGroup) -> Result<Group, DomainError>;
    /// Full-record replace; no partial-patch semantics.
    async fn update(&self, group: &Group) -> Result<(), DomainError>;
    async fn exists(&self, id: i64) -> Result<bool, DomainError>;
    /// Deletes only when no application and no group-role link references
    /// the group.
    async fn delete_if_unreferenced(&self, id: i64) -> Result<GroupDeleteOutcome, DomainError>;
}
