// ============================================================================
// AppGate API - Access Resolution Handler
// File: crates/appgate-api/src/handlers/access.rs
// ============================================================================
//! The single credential-validation endpoint other services call. The
//! credential pair itself is the caller's authentication; no admin token
//! is involved.

use axum::extract::State;
use axum::Json;

use appgate_core::services::AccessGrant;

use crate::dto::AccessRequest;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/access
pub async fn resolve_access(
    State(state): State<AppState>,
    Json(payload): Json<AccessRequest>,
) -> ApiResult<Json<AccessGrant>> {
    let grant = state
        .access
        .resolve_access(&payload.app_id, &payload.app_key)
        .await?;
    Ok(Json(grant))
}
