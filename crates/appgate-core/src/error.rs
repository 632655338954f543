//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Application not found.")]
    ApplicationNotFound,

    #[error("Application Group not found.")]
    GroupNotFound,

    #[error("Role not found.")]
    RoleNotFound,

    #[error("Role with ID {0} not found.")]
    RoleNotFoundById(i64),

    #[error("Application is already approved.")]
    ApplicationAlreadyApproved,

    #[error("Application is already rejected.")]
    ApplicationAlreadyRejected,

    #[error("Application must be approved before assigning to a group.")]
    ApplicationNotApprovedForGroup,

    #[error("Cannot delete group: Applications are still assigned to it.")]
    GroupHasApplications,

    #[error("Cannot delete group: Roles are still assigned to it.")]
    GroupHasRoles,

    #[error("Cannot delete role: It is currently assigned to one or more groups.")]
    RoleAssignedToGroups,

    #[error("An application with the same AppId and AppKey already exists.")]
    DuplicateCredentials,

    #[error("AppId and AppKey cannot be null or empty.")]
    MissingCredentials,

    #[error("Invalid AppId or AppKey.")]
    InvalidCredentials,

    #[error("Application is not approved.")]
    ApplicationNotApproved,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}
