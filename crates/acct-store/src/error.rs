//! Account error types.

use std::path::PathBuf;

use acct_core::{
    ERROR_CONFLICT, ERROR_CORRUPTED, ERROR_EMPTY_INPUT, ERROR_INVALID_FORMAT, ERROR_IO,
    ERROR_MALFORMED, ERROR_MISSING_FIELDS, ERROR_NOT_FOUND, ERROR_RENAME, ERROR_STORAGE,
};

use crate::account::Field;

/// Error returned by the codec, the store and the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Input byte stream had zero length.
    #[error("input is empty")]
    EmptyInput,

    /// Input is not a JSON object.
    #[error("malformed account description: {0}")]
    Malformed(String),

    /// Full-mode parse with one or more required keys absent.
    #[error("missing fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    /// A present field failed its format rule.
    #[error("invalid {field}: {reason}")]
    InvalidFormat {
        field: Field,
        reason: &'static str,
    },

    /// No record is stored under the login.
    #[error("account {0} does not exist")]
    NotFound(String),

    /// The stored record exists but does not parse. Content is never exposed.
    #[error("stored record for {0} is corrupted")]
    Corrupted(String),

    /// A rename targeted a login that already holds a record.
    #[error("account {0} already exists")]
    LoginTaken(String),

    /// The base directory cannot be created or accessed.
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other read/write/delete failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The renamed record was stored but the old one could not be removed.
    #[error("renamed {old} to {new} but could not remove {old}: {source}")]
    RenameIncomplete {
        old: String,
        new: String,
        #[source]
        source: Box<AccountError>,
    },
}

impl AccountError {
    /// Build an `InvalidFormat` error.
    #[inline]
    pub fn invalid(field: Field, reason: &'static str) -> Self {
        Self::InvalidFormat { field, reason }
    }

    /// Get the error type string for metrics and logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            AccountError::EmptyInput => ERROR_EMPTY_INPUT,
            AccountError::Malformed(_) => ERROR_MALFORMED,
            AccountError::MissingFields(_) => ERROR_MISSING_FIELDS,
            AccountError::InvalidFormat { .. } => ERROR_INVALID_FORMAT,
            AccountError::NotFound(_) => ERROR_NOT_FOUND,
            AccountError::Corrupted(_) => ERROR_CORRUPTED,
            AccountError::LoginTaken(_) => ERROR_CONFLICT,
            AccountError::StorageUnavailable { .. } => ERROR_STORAGE,
            AccountError::Io(_) => ERROR_IO,
            AccountError::RenameIncomplete { .. } => ERROR_RENAME,
        }
    }

    /// Whether the error was raised by document validation, before any
    /// storage was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AccountError::EmptyInput
                | AccountError::Malformed(_)
                | AccountError::MissingFields(_)
                | AccountError::InvalidFormat { .. }
        )
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
