//! Authentication service business logic.

mod auth_service;

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
