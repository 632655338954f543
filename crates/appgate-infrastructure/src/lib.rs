//! # AppGate Infrastructure
//!
//! PostgreSQL adapters for the core repository ports.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgApplicationRepository, PgGroupRepository,
    PgGroupRoleRepository, PgRoleRepository,
};
