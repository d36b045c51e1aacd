//! Domain-level errors.
//!
//! These errors represent contract violations detected before any
//! infrastructure is touched. They are independent of HTTP and storage.

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required argument was absent
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a precondition error
    pub fn precondition(msg: impl Into<String>) -> Self {
        DomainError::Precondition(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
