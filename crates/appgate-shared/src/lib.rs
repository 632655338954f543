//! # AppGate Shared
//!
//! Configuration, telemetry, and startup error types shared by every
//! AppGate crate.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::StartupError;
