//! Handlers shared by every route.

use axum::http::StatusCode;

use crate::error::AppError;

/// Bare `OPTIONS` requests succeed with no body. CORS preflights carrying
/// `Access-Control-Request-Method` are answered earlier by the CORS layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn health() -> &'static str {
    "ok"
}
