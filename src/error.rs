//! Error types for the RAG chat system

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG chat system errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The similarity-search capability is not configured or unreachable
    #[error("Retrieval unavailable: {0}")]
    RetrievalUnavailable(String),

    /// The language-generation capability errored or timed out
    #[error("Generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// The model output did not satisfy the structured output contract
    #[error("Contract violation: {detail}")]
    ContractViolation { detail: String },

    /// Appending a turn to the session history failed.
    /// Logged by the generator; never fails an already-produced answer.
    #[error("History write failed: {0}")]
    HistoryWrite(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a retrieval unavailability error
    pub fn retrieval_unavailable(message: impl Into<String>) -> Self {
        Self::RetrievalUnavailable(message.into())
    }

    /// Create a generation failure
    pub fn generation_failed(reason: impl Into<String>) -> Self {
        Self::GenerationFailed {
            reason: reason.into(),
        }
    }

    /// Create a contract violation
    pub fn contract_violation(detail: impl Into<String>) -> Self {
        Self::ContractViolation {
            detail: detail.into(),
        }
    }

    /// Create a history write error
    pub fn history_write(message: impl Into<String>) -> Self {
        Self::HistoryWrite(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // The three generation-path failures surface a generic message to the
        // caller; the detail stays in the server logs.
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone()),
            Error::RetrievalUnavailable(msg) => {
                tracing::error!("Retrieval unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "retrieval_unavailable",
                    "Could not produce a response".to_string(),
                )
            }
            Error::GenerationFailed { reason } => {
                tracing::error!("Generation failed: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    "generation_failed",
                    "Could not produce a response".to_string(),
                )
            }
            Error::ContractViolation { detail } => {
                tracing::error!("Contract violation: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    "contract_violation",
                    "Could not produce a response".to_string(),
                )
            }
            Error::HistoryWrite(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "history_write_failed",
                msg.clone(),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
