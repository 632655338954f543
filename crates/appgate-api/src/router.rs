//! Route table

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{access, admin, health};
use crate::middleware::require_administrator;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/groups", post(admin::create_group))
        .route("/roles", post(admin::create_role))
        .route("/applications", post(admin::create_application))
        .route("/applications/pending", get(admin::list_pending_applications))
        .route("/applications/{id}/approve", put(admin::approve_application))
        .route("/applications/{id}/reject", put(admin::reject_application))
        .route(
            "/applications/{id}/group",
            put(admin::assign_application_to_group),
        )
        .route("/groups/{id}/roles", post(admin::assign_roles_to_group))
        .route("/groups/{id}", delete(admin::delete_group))
        .route("/applications/{id}", delete(admin::delete_application))
        .route("/roles/{id}", delete(admin::delete_role))
        .route_layer(from_fn_with_state(state.clone(), require_administrator));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/access", post(access::resolve_access))
        .nest("/api/admin", admin_routes)
        .with_state(state)
}
