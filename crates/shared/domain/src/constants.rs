//! Domain-level constants.
//!
//! These constants define document layout, operation status codes and
//! token rules shared across crates.

// =============================================================================
// Documents
// =============================================================================

/// Name of the identifier field inside every stored document
pub const ID_FIELD: &str = "id";

/// Separator for nested field paths in filters (e.g. `address.city`)
pub const FIELD_PATH_SEPARATOR: char = '.';

// =============================================================================
// Operation Status Codes
// =============================================================================

/// Status has not been set by any operation yet
pub const STATUS_UNSET: i32 = i32::MIN;

/// Document(s) read successfully
pub const STATUS_OK: i32 = 200;

/// Document created
pub const STATUS_CREATED: i32 = 201;

/// Document updated or deleted, nothing to return
pub const STATUS_NO_CONTENT: i32 = 204;

/// Target document does not exist
pub const STATUS_NOT_FOUND: i32 = 404;

/// Store-level failure
pub const STATUS_INTERNAL_ERROR: i32 = 500;

// =============================================================================
// Authentication
// =============================================================================

/// Lifetime of an issued token in minutes
pub const TOKEN_LIFETIME_MINUTES: i64 = 10;

/// Seconds per minute (for token expiration calculation)
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Minimum signing key length in bytes
pub const MIN_SIGNING_KEY_LENGTH: usize = 16;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
