//! Error types for Credential Gate.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned when the request payload cannot be decoded.
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Body returned when the credentials do not match the store.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Unified error type for Credential Gate operations.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            GateError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Rejected request payload");
                (StatusCode::BAD_REQUEST, INVALID_PAYLOAD)
            }
            GateError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS),
            GateError::Config(msg) => {
                // Log the actual error but don't expose internals
                tracing::error!(error = %msg, "Configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
        };

        (status, body).into_response()
    }
}

/// Result type alias for Credential Gate operations.
pub type GateResult<T> = Result<T, GateError>;
