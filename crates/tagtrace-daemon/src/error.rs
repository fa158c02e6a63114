//! Daemon error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tagtrace_registry::RegistryError;
use tagtrace_types::TagId;
use thiserror::Error;

/// Top-level daemon errors (startup and lifecycle)
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type for daemon lifecycle operations
pub type DaemonResult<T> = Result<T, DaemonError>;

/// Detection ingest errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// The tag does not resolve to a registered device. No ledger write
    /// happened and no signal was published.
    #[error("Device with tag {0} not registered")]
    UnknownDevice(TagId),

    /// The durable store failed; the caller may retry, the core does not.
    #[error(transparent)]
    Storage(#[from] RegistryError),
}

/// API-surface errors with their HTTP mapping
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnknownDevice(_) => ApiError::NotFound(err.to_string()),
            IngestError::Storage(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}
