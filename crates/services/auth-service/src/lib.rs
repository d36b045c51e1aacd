//! Auth Service Library
//!
//! Credential fingerprinting and short-lived bearer token issuance for the
//! single configured alias. Tokens are stateless; nothing is persisted.

pub mod cypher;
pub mod service;

pub use cypher::{fingerprint_secret, verify_fingerprint};
pub use service::{AuthService, Authenticator, Claims, TokenResponse};
