use std::sync::Arc;

use appgate_core::services::{AccessService, AdminService};
use appgate_security::TokenVerifier;

#[derive(Clone)]
pub struct AppState {
    pub admin: Arc<AdminService>,
    pub access: Arc<AccessService>,
    pub verifier: Arc<TokenVerifier>,
}
