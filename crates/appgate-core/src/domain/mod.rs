//! # AppGate Core - Domain Module
//!
//! Domain entities for the application registry.

pub mod application;
pub mod group;
pub mod group_role;
pub mod role;

// Re-export all entities and enums
pub use application::{AppStatus, Application, NewApplication, ResolvedApplication};
pub use group::{Group, NewGroup};
pub use group_role::{GroupRole, NewGroupRole};
pub use role::{NewRole, Role};
