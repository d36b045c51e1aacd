//! Operation status reported alongside each call of the status-reporting
//! repository.

use serde::{Deserialize, Serialize};

use crate::constants::{
    STATUS_CREATED, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND, STATUS_NO_CONTENT, STATUS_OK,
    STATUS_UNSET,
};

/// HTTP-style status code plus a description of what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStatus {
    pub code: i32,
    pub message: String,
}

impl OperationStatus {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(STATUS_OK, message)
    }

    pub fn created(message: impl Into<String>) -> Self {
        Self::new(STATUS_CREATED, message)
    }

    pub fn no_content(message: impl Into<String>) -> Self {
        Self::new(STATUS_NO_CONTENT, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(STATUS_NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(STATUS_INTERNAL_ERROR, message)
    }

    /// True for 2xx codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_set(&self) -> bool {
        self.code != STATUS_UNSET
    }
}

impl Default for OperationStatus {
    fn default() -> Self {
        Self::new(STATUS_UNSET, String::new())
    }
}
