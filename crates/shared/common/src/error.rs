//! Unified error handling.
//!
//! Provides a single error type for faults raised by the repository layer,
//! the auth service and the HTTP gateway, convertible to Axum responses.
//! Expected negatives (record not found, credential mismatch) are not errors
//! and never pass through here on the library side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("{0} already exists")]
    Conflict(String),

    // Caller errors
    #[error("{0}")]
    Validation(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    // Store errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Document serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[cfg(feature = "jwt")]
    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Precondition(_) => "PRECONDITION_FAILED",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Store(_) => "STORE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::Precondition(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures of the underlying store (connection, query, codec)
    pub fn is_store_fault(&self) -> bool {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(_) => true,
            AppError::Serialization(_) | AppError::Store(_) | AppError::Conflict(_) => true,
            _ => false,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::Precondition(msg) => msg.clone(),
            AppError::Conflict(msg) => format!("{} already exists", msg),

            // Hide details for internal/security errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Precondition(msg) => AppError::Precondition(msg),
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        AppError::Precondition(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        AppError::Store(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::conflict("Document").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::precondition("entity").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::store("connection reset").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_fault_message_is_generic() {
        let err = AppError::store("host db-1 refused connection");
        assert!(err.is_store_fault());
        assert!(!err.user_message().contains("db-1"));
    }

    #[test]
    fn test_domain_conversion() {
        let err: AppError = DomainError::precondition("missing entity").into();
        assert!(matches!(err, AppError::Precondition(ref m) if m == "missing entity"));
    }
}
