//! PostgreSQL repository implementations

pub mod application_repo_impl;
pub mod group_repo_impl;
pub mod group_role_repo_impl;
pub mod role_repo_impl;

pub use application_repo_impl::PgApplicationRepository;
pub use group_repo_impl::PgGroupRepository;
pub use group_role_repo_impl::PgGroupRoleRepository;
pub use role_repo_impl::PgRoleRepository;

use appgate_core::error::DomainError;
use tracing::error;

/// Storage failures stay opaque to the core: log the detail, surface a
/// generic database error.
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::Database(e.to_string())
    }
}
