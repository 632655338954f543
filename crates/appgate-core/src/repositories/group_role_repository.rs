//! Group-role link repository trait (port)

use async_trait::async_trait;

use crate::domain::{GroupRole, NewGroupRole};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRoleRepository: Send + Sync {
    async fn find_by_group(&self, group_id: i64) -> Result<Vec<GroupRole>, DomainError>;
    async fn find_by_role(&self, role_id: i64) -> Result<Vec<GroupRole>, DomainError>;
    /// Inserts every link in one transaction and returns how many were
    /// actually created. A pair the group already holds is skipped; a
    /// link whose role or group vanished mid-batch aborts the whole
    /// batch.
    async fn add_links(&self, links: &[NewGroupRole]) -> Result<u64, DomainError>;
}
