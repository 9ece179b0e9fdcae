//! HTTP request handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};

use crate::api::types::*;
use crate::error::{GateError, GateResult};
use crate::AppState;

/// Body returned on a successful login.
pub const LOGIN_SUCCESSFUL: &str = "Login successful";

// ==================== Authentication Endpoints ====================

/// Check a username/password pair.
///
/// POST /login
///
/// The body is decoded by hand instead of through the `Json` extractor so a
/// missing `Content-Type` header is accepted and every decode failure maps to
/// the same 400 response. A body over the router's size limit is a 400 too.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request payload", body = String, content_type = "text/plain"),
        (status = 401, description = "Invalid credentials", body = String, content_type = "text/plain")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> GateResult<&'static str> {
    let body = body.map_err(|e| GateError::BadRequest(e.body_text()))?;
    let request = LoginRequest::from_body(&body)?;

    if !state
        .authenticator
        .authenticate(&request.username, &request.password)
    {
        return Err(GateError::Unauthorized(request.username));
    }

    tracing::info!(username = %request.username, "User logged in");

    Ok(LOGIN_SUCCESSFUL)
}

// ==================== Health ====================

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users: state.user_count,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
