//! # AppGate API
//!
//! HTTP handlers, middleware, DTOs, and the router.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use router::router;
pub use state::AppState;
