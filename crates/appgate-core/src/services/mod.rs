//! Domain services (business logic)

pub mod access_service;
pub mod admin_service;

pub use access_service::{AccessGrant, AccessService, GroupAccess};
pub use admin_service::AdminService;
