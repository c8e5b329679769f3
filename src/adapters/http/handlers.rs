//! Endpoint handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::error::AppError;
use super::AppState;
use crate::domain::service::ServiceInfo;

/// Body of a successful health check.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub pong: bool,
    pub message: &'static str,
}

/// `GET /ping` - always healthy.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        pong: true,
        message: "Service is healthy",
    })
}

/// `GET /error` - always fails with a 500.
pub async fn error() -> Result<(), AppError> {
    Err(AppError::Intentional)
}

/// `GET /metrics` - Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let exposition = state.metrics.expose()?;
    Ok((
        [(header::CONTENT_TYPE, exposition.content_type)],
        exposition.body,
    )
        .into_response())
}

/// `GET /` - static service descriptor.
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info.as_ref().clone())
}

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
