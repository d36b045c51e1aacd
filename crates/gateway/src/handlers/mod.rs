//! HTTP request handlers.

pub mod auth_handler;

pub use auth_handler::{auth_routes, protected_auth_routes};
