//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default directory holding one document per account.
pub const DEFAULT_DATA_DIR: &str = "./data/";
/// Extension appended to the login to form a record's file name.
pub const RECORD_EXTENSION: &str = "json";

// ============================================================================
// HTTP Defaults
// ============================================================================

/// Default HTTP listen address for the account gateway.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
/// Path prefix of the account resource.
pub const ACCOUNTS_PATH: &str = "/accounts";
/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log format (pretty, compact, json).
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
/// Default log output (stdout, stderr).
pub const DEFAULT_LOG_OUTPUT: &str = "stderr";
