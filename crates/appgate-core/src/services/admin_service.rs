// ============================================================================
// AppGate Core - Administration Service
// File: crates/appgate-core/src/services/admin_service.rs
// ============================================================================
//! Administrative workflow over the application registry: create
//! groups/roles/applications, drive the approval lifecycle, wire the
//! group/role graph, and delete with dependency guards.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{AppStatus, Application, NewApplication, NewGroup, NewGroupRole, NewRole};
use crate::error::DomainError;
use crate::repositories::{
    ApplicationRepository, GroupDeleteOutcome, GroupRepository, GroupRoleRepository,
    RoleDeleteOutcome, RoleRepository,
};

/// Every mutating operation takes the acting administrator's label,
/// extracted from the verified admin token by the transport layer, and
/// stamps it into the audit metadata.
pub struct AdminService {
    groups: Arc<dyn GroupRepository>,
    roles: Arc<dyn RoleRepository>,
    applications: Arc<dyn ApplicationRepository>,
    group_roles: Arc<dyn GroupRoleRepository>,
}

impl AdminService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        roles: Arc<dyn RoleRepository>,
        applications: Arc<dyn ApplicationRepository>,
        group_roles: Arc<dyn GroupRoleRepository>,
    ) -> Self {
        Self {
            groups,
            roles,
            applications,
            group_roles,
        }
    }

    pub async fn create_group(&self, name: &str, actor: &str) -> Result<i64, DomainError> {
        let new_group = NewGroup::new(name, actor)?;
        let group = self.groups.add(&new_group).await?;
        info!(group_id = group.id, name = %group.name, "group created");
        Ok(group.id)
    }

    pub async fn create_role(&self, name: &str, actor: &str) -> Result<i64, DomainError> {
        let new_role = NewRole::new(name, actor)?;
        let role = self.roles.add(&new_role).await?;
        info!(role_id = role.id, name = %role.name, "role created");
        Ok(role.id)
    }

    /// Registers an application in status Pending with no group. Missing
    /// credential fields are generated; supplied ones are stored verbatim.
    pub async fn create_application(
        &self,
        name: &str,
        app_id: Option<&str>,
        app_key: Option<&str>,
        actor: &str,
    ) -> Result<i64, DomainError> {
        let new_application = NewApplication::new(name, app_id, app_key, actor)?;
        let application = self.applications.add(&new_application).await?;
        // The key is a secret; only the public half goes to the log.
        info!(
            application_id = application.id,
            app_id = %application.app_id,
            name = %application.name,
            "application registered, pending approval"
        );
        Ok(application.id)
    }

    pub async fn list_pending_applications(&self) -> Result<Vec<Application>, DomainError> {
        self.applications.find_by_status(AppStatus::Pending).await
    }

    pub async fn approve_application(&self, id: i64, actor: &str) -> Result<i64, DomainError> {
        let mut application = self
            .applications
            .get_by_id(id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)?;

        if application.status == AppStatus::Approved {
            warn!(application_id = id, "approve refused: already approved");
            return Err(DomainError::ApplicationAlreadyApproved);
        }

        application.approve(actor);
        self.applications.update(&application).await?;
        info!(application_id = id, "application approved");
        Ok(id)
    }

    pub async fn reject_application(&self, id: i64, actor: &str) -> Result<i64, DomainError> {
        let mut application = self
            .applications
            .get_by_id(id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)?;

        if application.status == AppStatus::Rejected {
            warn!(application_id = id, "reject refused: already rejected");
            return Err(DomainError::ApplicationAlreadyRejected);
        }

        application.reject(actor);
        self.applications.update(&application).await?;
        info!(application_id = id, "application rejected");
        Ok(id)
    }

    /// Only approved applications may be grouped. Reassignment silently
    /// overwrites the previous group; no history is kept.
    pub async fn assign_application_to_group(
        &self,
        application_id: i64,
        group_id: i64,
        actor: &str,
    ) -> Result<i64, DomainError> {
        let mut application = self
            .applications
            .get_by_id(application_id)
            .await?
            .ok_or(DomainError::ApplicationNotFound)?;

        if self.groups.get_by_id(group_id).await?.is_none() {
            return Err(DomainError::GroupNotFound);
        }

        if application.status != AppStatus::Approved {
            warn!(
                application_id,
                group_id, "group assignment refused: application not approved"
            );
            return Err(DomainError::ApplicationNotApprovedForGroup);
        }

        application.assign_group(group_id, actor);
        self.applications.update(&application).await?;
        info!(application_id, group_id, "application assigned to group");
        Ok(application_id)
    }

    /// Validates the full role set before creating any link; the link
    /// batch itself is inserted atomically by the gateway, with pairs the
    /// group already holds skipped.
    pub async fn assign_roles_to_group(
        &self,
        group_id: i64,
        role_ids: &[i64],
        actor: &str,
    ) -> Result<(), DomainError> {
        let group = self
            .groups
            .get_by_id(group_id)
            .await?
            .ok_or(DomainError::GroupNotFound)?;

        let mut links = Vec::with_capacity(role_ids.len());
        for &role_id in role_ids {
            if self.roles.get_by_id(role_id).await?.is_none() {
                return Err(DomainError::RoleNotFoundById(role_id));
            }
            links.push(NewGroupRole::new(group.id, role_id, actor));
        }

        let created = self.group_roles.add_links(&links).await?;
        info!(
            group_id,
            requested = role_ids.len(),
            created,
            "roles assigned to group"
        );
        Ok(())
    }

    /// Deletion is leaf-only: the group must hold no applications and no
    /// role links.
    pub async fn delete_group(&self, id: i64) -> Result<(), DomainError> {
        match self.groups.delete_if_unreferenced(id).await? {
            GroupDeleteOutcome::Deleted => {
                info!(group_id = id, "group deleted");
                Ok(())
            }
            GroupDeleteOutcome::NotFound => Err(DomainError::GroupNotFound),
            GroupDeleteOutcome::HasApplications => {
                warn!(group_id = id, "delete refused: applications still assigned");
                Err(DomainError::GroupHasApplications)
            }
            GroupDeleteOutcome::HasRoles => {
                warn!(group_id = id, "delete refused: roles still assigned");
                Err(DomainError::GroupHasRoles)
            }
        }
    }

    /// A group assignment never blocks deletion; the back-reference is
    /// simply dropped with the row.
    pub async fn delete_application(&self, id: i64) -> Result<(), DomainError> {
        if !self.applications.exists(id).await? {
            return Err(DomainError::ApplicationNotFound);
        }
        self.applications.delete(id).await?;
        info!(application_id = id, "application deleted");
        Ok(())
    }

    pub async fn delete_role(&self, id: i64) -> Result<(), DomainError> {
        match self.roles.delete_if_unreferenced(id).await? {
            RoleDeleteOutcome::Deleted => {
                info!(role_id = id, "role deleted");
                Ok(())
            }
            RoleDeleteOutcome::NotFound => Err(DomainError::RoleNotFound),
            RoleDeleteOutcome::InUse => {
                warn!(role_id = id, "delete refused: role still assigned to groups");
                Err(DomainError::RoleAssignedToGroups)
            }
        }
    }
}
