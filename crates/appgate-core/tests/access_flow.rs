//! End-to-end exercise of the administration workflow and access
//! resolution against in-memory repositories.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use appgate_core::domain::{
    AppStatus, Application, Group, GroupRole, NewApplication, NewGroup, NewGroupRole, NewRole,
    ResolvedApplication, Role,
};
use appgate_core::error::DomainError;
use appgate_core::repositories::{
    ApplicationRepository, GroupDeleteOutcome, GroupRepository, GroupRoleRepository,
    RoleDeleteOutcome, RoleRepository,
};
use appgate_core::services::{AccessService, AdminService};

#[derive(Default)]
struct InMemoryRegistry {
    groups: Mutex<Vec<Group>>,
    roles: Mutex<Vec<Role>>,
    applications: Mutex<Vec<Application>>,
    links: Mutex<Vec<GroupRole>>,
    next_id: AtomicI64,
}

impl InMemoryRegistry {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        })
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn stored_application(&self, id: i64) -> Application {
        self.applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .expect("application should be stored")
    }

    fn link_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl GroupRepository for InMemoryRegistry {
    async fn get_all(&self) -> Result<Vec<Group>, DomainError> {
        Ok(self.groups.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Group>, DomainError> {
        Ok(self.groups.lock().unwrap().iter().find(|g| g.id == id).cloned())
    }

    async fn add(&self, group: &NewGroup) -> Result<Group, DomainError> {
        let stored = Group {
            id: self.assign_id(),
            name: group.name.clone(),
            created_at: group.created_at,
            created_by: group.created_by.clone(),
            modified_at: group.modified_at,
            modified_by: group.modified_by.clone(),
        };
        self.groups.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, group: &Group) -> Result<(), DomainError> {
        let mut groups = self.groups.lock().unwrap();
        if let Some(existing) = groups.iter_mut().find(|g| g.id == group.id) {
            *existing = group.clone();
        }
        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.groups.lock().unwrap().iter().any(|g| g.id == id))
    }

    async fn delete_if_unreferenced(&self, id: i64) -> Result<GroupDeleteOutcome, DomainError> {
        let mut groups = self.groups.lock().unwrap();
        if !groups.iter().any(|g| g.id == id) {
            return Ok(GroupDeleteOutcome::NotFound);
        }
        if self
            .applications
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.group_id == Some(id))
        {
            return Ok(GroupDeleteOutcome::HasApplications);
        }
        if self.links.lock().unwrap().iter().any(|l| l.group_id == id) {
            return Ok(GroupDeleteOutcome::HasRoles);
        }
        groups.retain(|g| g.id != id);
        Ok(GroupDeleteOutcome::Deleted)
    }
}

#[async_trait]
impl RoleRepository for InMemoryRegistry {
    async fn get_all(&self) -> Result<Vec<Role>, DomainError> {
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Role>, DomainError> {
        Ok(self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn add(&self, role: &NewRole) -> Result<Role, DomainError> {
        let stored = Role {
            id: self.assign_id(),
            name: role.name.clone(),
            created_at: role.created_at,
            created_by: role.created_by.clone(),
            modified_at: role.modified_at,
            modified_by: role.modified_by.clone(),
        };
        self.roles.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, role: &Role) -> Result<(), DomainError> {
        let mut roles = self.roles.lock().unwrap();
        if let Some(existing) = roles.iter_mut().find(|r| r.id == role.id) {
            *existing = role.clone();
        }
        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.roles.lock().unwrap().iter().any(|r| r.id == id))
    }

    async fn delete_if_unreferenced(&self, id: i64) -> Result<RoleDeleteOutcome, DomainError> {
        let mut roles = self.roles.lock().unwrap();
        if !roles.iter().any(|r| r.id == id) {
            return Ok(RoleDeleteOutcome::NotFound);
        }
        if self.links.lock().unwrap().iter().any(|l| l.role_id == id) {
            return Ok(RoleDeleteOutcome::InUse);
        }
        roles.retain(|r| r.id != id);
        Ok(RoleDeleteOutcome::Deleted)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryRegistry {
    async fn get_all(&self) -> Result<Vec<Application>, DomainError> {
        Ok(self.applications.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Application>, DomainError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_status(&self, status: AppStatus) -> Result<Vec<Application>, DomainError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.status == status)
            .cloned()
            .collect())
    }

    async fn find_by_group(&self, group_id: i64) -> Result<Vec<Application>, DomainError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.group_id == Some(group_id))
            .cloned()
            .collect())
    }

    async fn add(&self, application: &NewApplication) -> Result<Application, DomainError> {
        let stored = Application {
            id: self.assign_id(),
            app_id: application.app_id.clone(),
            app_key: application.app_key.clone(),
            name: application.name.clone(),
            status: application.status,
            group_id: application.group_id,
            created_at: application.created_at,
            created_by: application.created_by.clone(),
            modified_at: application.modified_at,
            modified_by: application.modified_by.clone(),
        };
        self.applications.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, application: &Application) -> Result<(), DomainError> {
        let mut applications = self.applications.lock().unwrap();
        if let Some(existing) = applications.iter_mut().find(|a| a.id == application.id) {
            *existing = application.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.applications.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.applications.lock().unwrap().iter().any(|a| a.id == id))
    }

    async fn get_by_credentials(
        &self,
        app_id: &str,
        app_key: &str,
    ) -> Result<Option<ResolvedApplication>, DomainError> {
        let application = self
            .applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.app_id == app_id && a.app_key == app_key)
            .cloned();

        let Some(application) = application else {
            return Ok(None);
        };

        let group = match application.group_id {
            Some(group_id) => self
                .groups
                .lock()
                .unwrap()
                .iter()
                .find(|g| g.id == group_id)
                .cloned(),
            None => None,
        };

        let roles = match &group {
            Some(group) => {
                let role_ids: Vec<i64> = self
                    .links
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|l| l.group_id == group.id)
                    .map(|l| l.role_id)
                    .collect();
                self.roles
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|r| role_ids.contains(&r.id))
                    .cloned()
                    .collect()
            }
            None => vec![],
        };

        Ok(Some(ResolvedApplication {
            application,
            group,
            roles,
        }))
    }
}

#[async_trait]
impl GroupRoleRepository for InMemoryRegistry {
    async fn find_by_group(&self, group_id: i64) -> Result<Vec<GroupRole>, DomainError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn find_by_role(&self, role_id: i64) -> Result<Vec<GroupRole>, DomainError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.role_id == role_id)
            .cloned()
            .collect())
    }

    async fn add_links(&self, new_links: &[NewGroupRole]) -> Result<u64, DomainError> {
        // All-or-nothing: a dangling role fails the whole batch, the way
        // the FK constraint aborts the transaction in the real gateway.
        {
            let roles = self.roles.lock().unwrap();
            for link in new_links {
                if !roles.iter().any(|r| r.id == link.role_id) {
                    return Err(DomainError::Database(format!(
                        "foreign key violation: role {}",
                        link.role_id
                    )));
                }
            }
        }

        let mut links = self.links.lock().unwrap();
        let mut created = 0;
        for link in new_links {
            let duplicate = links
                .iter()
                .any(|l| l.group_id == link.group_id && l.role_id == link.role_id);
            if duplicate {
                continue;
            }
            links.push(GroupRole {
                group_id: link.group_id,
                role_id: link.role_id,
                created_at: link.created_at,
                created_by: link.created_by.clone(),
                modified_at: link.modified_at,
                modified_by: link.modified_by.clone(),
            });
            created += 1;
        }
        Ok(created)
    }
}

fn services(registry: &Arc<InMemoryRegistry>) -> (AdminService, AccessService) {
    let admin = AdminService::new(
        registry.clone(),
        registry.clone(),
        registry.clone(),
        registry.clone(),
    );
    let access = AccessService::new(registry.clone());
    (admin, access)
}

#[tokio::test]
async fn full_registration_and_resolution_flow() {
    let registry = InMemoryRegistry::new();
    let (admin, access) = services(&registry);

    let group_id = admin.create_group("Partners", "admin").await.unwrap();
    let role_id = admin.create_role("Reader", "admin").await.unwrap();
    admin
        .assign_roles_to_group(group_id, &[role_id], "admin")
        .await
        .unwrap();
    assert_eq!(registry.link_count(), 1);

    let links = GroupRoleRepository::find_by_group(registry.as_ref(), group_id)
        .await
        .unwrap();
    assert_eq!((links[0].group_id, links[0].role_id), (group_id, role_id));

    let application_id = admin
        .create_application("Acme", Some("null"), Some("null"), "admin")
        .await
        .unwrap();
    let stored = registry.stored_application(application_id);
    assert_eq!(stored.status, AppStatus::Pending);
    assert!(!stored.app_id.eq_ignore_ascii_case("null"));

    // Pending applications resolve to Forbidden, not Unauthorized.
    let err = access
        .resolve_access(&stored.app_id, &stored.app_key)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ApplicationNotApproved));

    admin
        .approve_application(application_id, "admin")
        .await
        .unwrap();
    admin
        .assign_application_to_group(application_id, group_id, "admin")
        .await
        .unwrap();

    let grant = access
        .resolve_access(&stored.app_id, &stored.app_key)
        .await
        .unwrap();
    assert_eq!(grant.app_name, "Acme");
    assert!(grant.is_approved);
    let group = grant.group.expect("group should be resolved");
    assert_eq!(group.name, "Partners");
    assert_eq!(group.roles, vec!["Reader".to_string()]);
}

#[tokio::test]
async fn repeated_role_assignment_is_idempotent() {
    let registry = InMemoryRegistry::new();
    let (admin, _) = services(&registry);

    let group_id = admin.create_group("Partners", "admin").await.unwrap();
    let role_id = admin.create_role("Reader", "admin").await.unwrap();

    admin
        .assign_roles_to_group(group_id, &[role_id], "admin")
        .await
        .unwrap();
    admin
        .assign_roles_to_group(group_id, &[role_id], "admin")
        .await
        .unwrap();

    assert_eq!(registry.link_count(), 1);
}

#[tokio::test]
async fn group_and_role_deletion_is_leaf_only() {
    let registry = InMemoryRegistry::new();
    let (admin, _) = services(&registry);

    let group_id = admin.create_group("Partners", "admin").await.unwrap();
    let role_id = admin.create_role("Reader", "admin").await.unwrap();
    admin
        .assign_roles_to_group(group_id, &[role_id], "admin")
        .await
        .unwrap();

    let application_id = admin
        .create_application("Acme", None, None, "admin")
        .await
        .unwrap();
    admin
        .approve_application(application_id, "admin")
        .await
        .unwrap();
    admin
        .assign_application_to_group(application_id, group_id, "admin")
        .await
        .unwrap();

    // Applications block first, then role links.
    let err = admin.delete_group(group_id).await.unwrap_err();
    assert!(matches!(err, DomainError::GroupHasApplications));

    let err = admin.delete_role(role_id).await.unwrap_err();
    assert!(matches!(err, DomainError::RoleAssignedToGroups));
    assert_eq!(
        GroupRoleRepository::find_by_role(registry.as_ref(), role_id)
            .await
            .unwrap()
            .len(),
        1
    );

    // Deleting the grouped application is always allowed and shrinks the
    // group's application set without touching the group.
    admin.delete_application(application_id).await.unwrap();
    let remaining = ApplicationRepository::find_by_group(registry.as_ref(), group_id)
        .await
        .unwrap();
    assert!(remaining.is_empty());
    assert!(GroupRepository::exists(registry.as_ref(), group_id)
        .await
        .unwrap());

    let err = admin.delete_group(group_id).await.unwrap_err();
    assert!(matches!(err, DomainError::GroupHasRoles));
}
