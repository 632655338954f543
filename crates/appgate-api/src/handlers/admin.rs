// ============================================================================
// AppGate API - Admin Handlers
// File: crates/appgate-api/src/handlers/admin.rs
// ============================================================================
//! Administrative endpoints: registry mutations and the pending listing.
//! All of them sit behind the Administrator bearer-token middleware.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use validator::Validate;

use appgate_core::error::DomainError;

use crate::dto::{
    ApplicationSummary, AssignGroupRequest, AssignRolesRequest, CreateApplicationRequest,
    CreateGroupRequest, CreateRoleRequest,
};
use crate::error::ApiResult;
use crate::middleware::AdminContext;
use crate::response::CommandResponse;
use crate::state::AppState;

/// POST /api/admin/groups
pub async fn create_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Json(payload): Json<CreateGroupRequest>,
) -> ApiResult<Json<CommandResponse>> {
    payload
        .validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let id = state.admin.create_group(&payload.name, &ctx.actor).await?;
    Ok(Json(CommandResponse::ok(
        "Group created successfully.",
        Some(id),
    )))
}

/// POST /api/admin/roles
pub async fn create_role(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<Json<CommandResponse>> {
    payload
        .validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let id = state.admin.create_role(&payload.name, &ctx.actor).await?;
    Ok(Json(CommandResponse::ok(
        "Role created successfully.",
        Some(id),
    )))
}

/// POST /api/admin/applications
pub async fn create_application(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Json(payload): Json<CreateApplicationRequest>,
) -> ApiResult<Json<CommandResponse>> {
    payload
        .validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let id = state
        .admin
        .create_application(
            &payload.name,
            payload.app_id.as_deref(),
            payload.app_key.as_deref(),
            &ctx.actor,
        )
        .await?;
    Ok(Json(CommandResponse::ok(
        "Application created successfully.",
        Some(id),
    )))
}

/// GET /api/admin/applications/pending
pub async fn list_pending_applications(
    State(state): State<AppState>,
    Extension(_ctx): Extension<AdminContext>,
) -> ApiResult<Json<Vec<ApplicationSummary>>> {
    let applications = state.admin.list_pending_applications().await?;
    Ok(Json(
        applications
            .into_iter()
            .map(ApplicationSummary::from)
            .collect(),
    ))
}

/// PUT /api/admin/applications/{id}/approve
pub async fn approve_application(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CommandResponse>> {
    let id = state.admin.approve_application(id, &ctx.actor).await?;
    Ok(Json(CommandResponse::ok(
        "Application approved successfully.",
        Some(id),
    )))
}

/// PUT /api/admin/applications/{id}/reject
pub async fn reject_application(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CommandResponse>> {
    let id = state.admin.reject_application(id, &ctx.actor).await?;
    Ok(Json(CommandResponse::ok(
        "Application rejected successfully.",
        Some(id),
    )))
}

/// PUT /api/admin/applications/{id}/group
pub async fn assign_application_to_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignGroupRequest>,
) -> ApiResult<Json<CommandResponse>> {
    let id = state
        .admin
        .assign_application_to_group(id, payload.group_id, &ctx.actor)
        .await?;
    Ok(Json(CommandResponse::ok(
        "Application assigned to group successfully.",
        Some(id),
    )))
}

/// POST /api/admin/groups/{id}/roles
pub async fn assign_roles_to_group(
    State(state): State<AppState>,
    Extension(ctx): Extension<AdminContext>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignRolesRequest>,
) -> ApiResult<Json<CommandResponse>> {
    state
        .admin
        .assign_roles_to_group(id, &payload.role_ids, &ctx.actor)
        .await?;
    Ok(Json(CommandResponse::ok(
        "Roles assigned to group successfully.",
        None,
    )))
}

/// DELETE /api/admin/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(_ctx): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CommandResponse>> {
    state.admin.delete_group(id).await?;
    Ok(Json(CommandResponse::ok("Group deleted successfully.", None)))
}

/// DELETE /api/admin/applications/{id}
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(_ctx): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CommandResponse>> {
    state.admin.delete_application(id).await?;
    Ok(Json(CommandResponse::ok(
        "Application deleted successfully.",
        None,
    )))
}

/// DELETE /api/admin/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    Extension(_ctx): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CommandResponse>> {
    state.admin.delete_role(id).await?;
    Ok(Json(CommandResponse::ok("Role deleted successfully.", None)))
}
