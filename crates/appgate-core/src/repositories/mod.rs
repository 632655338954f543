//! Repository traits (ports)

pub mod application_repository;
pub mod group_repository;
pub mod group_role_repository;
pub mod role_repository;

pub use application_repository::ApplicationRepository;
pub use group_repository::{GroupDeleteOutcome, GroupRepository};
pub use group_role_repository::GroupRoleRepository;
pub use role_repository::{RoleDeleteOutcome, RoleRepository};
