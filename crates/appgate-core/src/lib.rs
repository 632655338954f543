//! # AppGate Core
//!
//! Domain entities, repository ports, and the two domain services:
//! the administration workflow and credential-to-permission resolution.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
