// ============================================================================
// AppGate Core - Access Resolution Service
// File: crates/appgate-core/src/services/access_service.rs
// ============================================================================
//! Read-time resolution of a credential pair into an authorization
//! decision plus the caller's group and flattened role set. Pure read;
//! safe at arbitrary call rates and concurrency.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::{AppStatus, ResolvedApplication};
use crate::error::DomainError;
use crate::repositories::ApplicationRepository;

/// The authorization answer for a resolved application.
#[derive(Debug, Clone, Serialize)]
pub struct AccessGrant {
    pub app_name: String,
    pub is_approved: bool,
    pub group: Option<GroupAccess>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupAccess {
    pub name: String,
    pub roles: Vec<String>,
}

pub struct AccessService {
    applications: Arc<dyn ApplicationRepository>,
}

impl AccessService {
    pub fn new(applications: Arc<dyn ApplicationRepository>) -> Self {
        Self { applications }
    }

    /// An unknown `app_id` and a known `app_id` with the wrong key yield
    /// the same error: the lookup must not reveal which half of the pair
    /// failed.
    pub async fn resolve_access(
        &self,
        app_id: &str,
        app_key: &str,
    ) -> Result<AccessGrant, DomainError> {
        if app_id.trim().is_empty() || app_key.trim().is_empty() {
            return Err(DomainError::MissingCredentials);
        }

        let resolved = self
            .applications
            .get_by_credentials(app_id, app_key)
            .await?
            .ok_or_else(|| {
                warn!(app_id = %app_id, "access denied: credential pair unresolved");
                DomainError::InvalidCredentials
            })?;

        let ResolvedApplication {
            application,
            group,
            roles,
        } = resolved;

        if application.status != AppStatus::Approved {
            warn!(
                app_id = %application.app_id,
                status = application.status.as_str(),
                "access denied: application not approved"
            );
            return Err(DomainError::ApplicationNotApproved);
        }

        Ok(AccessGrant {
            app_name: application.name,
            is_approved: true,
            group: group.map(|g| GroupAccess {
                name: g.name,
                roles: roles.into_iter().map(|r| r.name).collect(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::domain::{Application, Group, NewApplication, Role};
    use crate::repositories::application_repository::MockApplicationRepository;

    fn application(status: AppStatus, group_id: Option<i64>) -> Application {
        let new = NewApplication::new("Acme", Some("acme-id"), Some("acme-key"), "admin").unwrap();
        Application {
            id: 1,
            app_id: new.app_id,
            app_key: new.app_key,
            name: new.name,
            status,
            group_id,
            created_at: new.created_at,
            created_by: new.created_by,
            modified_at: new.modified_at,
            modified_by: new.modified_by,
        }
    }

    fn partners_group() -> Group {
        let now = Utc::now();
        Group {
            id: 1,
            name: "Partners".to_string(),
            created_at: now,
            created_by: "admin".to_string(),
            modified_at: now,
            modified_by: "admin".to_string(),
        }
    }

    fn role(id: i64, name: &str) -> Role {
        let now = Utc::now();
        Role {
            id,
            name: name.to_string(),
            created_at: now,
            created_by: "admin".to_string(),
            modified_at: now,
            modified_by: "admin".to_string(),
        }
    }

    fn service(applications: MockApplicationRepository) -> AccessService {
        AccessService::new(Arc::new(applications))
    }

    #[tokio::test]
    async fn empty_credentials_are_unauthorized_without_a_lookup() {
        let applications = MockApplicationRepository::new();
        let svc = service(applications);

        for (id, key) in [("", "key"), ("id", ""), ("  ", "key")] {
            let err = svc.resolve_access(id, key).await.unwrap_err();
            assert!(matches!(err, DomainError::MissingCredentials));
        }
    }

    #[tokio::test]
    async fn unknown_id_and_wrong_key_are_indistinguishable() {
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_get_by_credentials()
            .returning(|_, _| Ok(None));

        let svc = service(applications);
        let unknown = svc.resolve_access("no-such-app", "key").await.unwrap_err();
        let wrong_key = svc.resolve_access("acme-id", "bad-key").await.unwrap_err();

        assert!(matches!(unknown, DomainError::InvalidCredentials));
        assert!(matches!(wrong_key, DomainError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong_key.to_string());
    }

    #[tokio::test]
    async fn unapproved_application_is_forbidden_not_unauthorized() {
        for status in [AppStatus::Pending, AppStatus::Rejected] {
            let mut applications = MockApplicationRepository::new();
            applications.expect_get_by_credentials().returning(move |_, _| {
                Ok(Some(ResolvedApplication {
                    application: application(status, None),
                    group: None,
                    roles: vec![],
                }))
            });

            let svc = service(applications);
            let err = svc.resolve_access("acme-id", "acme-key").await.unwrap_err();
            assert!(matches!(err, DomainError::ApplicationNotApproved));
        }
    }

    #[tokio::test]
    async fn ungrouped_application_resolves_without_a_group() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_get_by_credentials().returning(|_, _| {
            Ok(Some(ResolvedApplication {
                application: application(AppStatus::Approved, None),
                group: None,
                roles: vec![],
            }))
        });

        let svc = service(applications);
        let grant = svc.resolve_access("acme-id", "acme-key").await.unwrap();
        assert_eq!(grant.app_name, "Acme");
        assert!(grant.is_approved);
        assert!(grant.group.is_none());
    }

    #[tokio::test]
    async fn grouped_application_resolves_group_and_flattened_roles() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_get_by_credentials().returning(|_, _| {
            Ok(Some(ResolvedApplication {
                application: application(AppStatus::Approved, Some(1)),
                group: Some(partners_group()),
                roles: vec![role(1, "Reader"), role(2, "Writer")],
            }))
        });

        let svc = service(applications);
        let grant = svc.resolve_access("acme-id", "acme-key").await.unwrap();
        let group = grant.group.expect("group should be resolved");
        assert_eq!(group.name, "Partners");

        let mut roles = group.roles;
        roles.sort();
        assert_eq!(roles, vec!["Reader".to_string(), "Writer".to_string()]);
    }

    #[tokio::test]
    async fn group_without_roles_resolves_to_an_empty_role_list() {
        let mut applications = MockApplicationRepository::new();
        applications.expect_get_by_credentials().returning(|_, _| {
            Ok(Some(ResolvedApplication {
                application: application(AppStatus::Approved, Some(1)),
                group: Some(partners_group()),
                roles: vec![],
            }))
        });

        let svc = service(applications);
        let grant = svc.resolve_access("acme-id", "acme-key").await.unwrap();
        assert_eq!(grant.group.unwrap().roles.len(), 0);
    }
}
