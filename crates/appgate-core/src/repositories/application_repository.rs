//! Application repository trait (port)

use async_trait::async_trait;

use crate::domain::{AppStatus, Application, NewApplication, ResolvedApplication};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Application>, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Application>, DomainError>;
    async fn find_by_status(&self, status: AppStatus) -> Result<Vec<Application>, DomainError>;
    async fn find_by_group(&self, group_id: i64) -> Result<Vec<Application>, DomainError>;
    async fn add(&self, application: &NewApplication) -> Result<Application, DomainError>;
    /// Full-record replace; no partial-patch semantics.
    async fn update(&self, application: &Application) -> Result<(), DomainError>;
    async fn delete(&self, id: i64) -> Result<(), DomainError>;
    async fn exists(&self, id: i64) -> Result<bool, DomainError>;
    /// Exact-pair credential lookup, eagerly loading the group and the
    /// group's role set. Returns `None` for any non-matching pair.
    async fn get_by_credentials(
        &self,
        app_id: &str,
        app_key: &str,
    ) -> Result<Option<ResolvedApplication>, DomainError>;
}
