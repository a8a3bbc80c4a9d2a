//! Error type constants for metrics and logging.
//!
//! These constants provide consistent error classification across all crates.

/// Request body was empty.
pub const ERROR_EMPTY_INPUT: &str = "empty_input";
/// Request body or stored file was not a JSON object.
pub const ERROR_MALFORMED: &str = "malformed";
/// Full document lacked one or more required fields.
pub const ERROR_MISSING_FIELDS: &str = "missing_fields";
/// A field value failed its format rule.
pub const ERROR_INVALID_FORMAT: &str = "invalid_format";
/// No record stored under the requested login.
pub const ERROR_NOT_FOUND: &str = "not_found";
/// Stored record exists but does not parse.
pub const ERROR_CORRUPTED: &str = "corrupted";
/// Rename target login already holds a record.
pub const ERROR_CONFLICT: &str = "conflict";
/// Base directory cannot be created or accessed.
pub const ERROR_STORAGE: &str = "storage_unavailable";
/// I/O error.
pub const ERROR_IO: &str = "io";
/// Rename stored the new record but failed to drop the old one.
pub const ERROR_RENAME: &str = "rename_incomplete";
/// Configuration error.
pub const ERROR_CONFIG: &str = "config";
