//! Common utilities shared across all crates.
//!
//! This crate provides:
//! - Unified error handling with HTTP mapping
//! - Settings structures bound from the environment
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, LogLevel};
