//! Server error types.

use acct_core::{ERROR_CONFIG, ERROR_IO};
use acct_store::AccountError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(String),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// Get the error type string for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Io(_) | ServerError::Task(_) => ERROR_IO,
            ServerError::Config(_) => ERROR_CONFIG,
            ServerError::Account(e) => e.error_type(),
        }
    }

    /// HTTP status reported to the client.
    ///
    /// Rejected documents answer 415.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Account(e) if e.is_validation() => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServerError::Account(AccountError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Account(AccountError::LoginTaken(_)) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
