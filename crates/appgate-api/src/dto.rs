//! Request and response DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use appgate_core::domain::Application;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(max = 200, message = "Group name too long"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(max = 200, message = "Role name too long"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(length(max = 200, message = "Application name too long"))]
    pub name: String,
    /// Absent, blank, or the literal "null" means: generate one.
    #[serde(default)]
    #[validate(length(max = 200, message = "AppId too long"))]
    pub app_id: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200, message = "AppKey too long"))]
    pub app_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignGroupRequest {
    pub group_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AssignRolesRequest {
    pub role_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    pub app_id: String,
    pub app_key: String,
}

/// Summary view for listings. The `app_key` secret is deliberately not
/// part of this shape.
#[derive(Debug, Serialize)]
pub struct ApplicationSummary {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub app_id: String,
}

impl From<Application> for ApplicationSummary {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            name: application.name,
            status: application.status.as_str().to_string(),
            app_id: application.app_id,
        }
    }
}
