// ============================================================================
// AppGate API - Admin Authentication Middleware
// File: crates/appgate-api/src/middleware/auth.rs
// ============================================================================
//! Bearer-token guard for the administrative routes. The verified claims
//! supply the actor label stamped into audit metadata.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity of the authenticated administrator, injected as a request
/// extension for handlers to consume.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub actor: String,
}

pub async fn require_administrator(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.verifier.verify(token).map_err(|e| {
        warn!("admin token rejected: {}", e);
        ApiError::Unauthorized
    })?;

    if !claims.is_administrator() {
        warn!(subject = %claims.sub, "admin route refused: missing Administrator role");
        return Err(ApiError::Forbidden);
    }

    request.extensions_mut().insert(AdminContext {
        actor: claims.actor().to_string(),
    });

    Ok(next.run(request).await)
}
