//! HTTP error mapping.
//!
//! Every handler failure becomes a JSON body of the form
//! `{"detail": "..."}` with an explicit status code. The
//! instrumentation middleware only ever sees the mapped status.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Detail returned by the intentionally failing endpoint.
pub const INTENTIONAL_ERROR_DETAIL: &str = "This is an intentional error for testing purposes";

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum AppError {
    /// The `/error` endpoint, which always fails.
    #[error("This is an intentional error for testing purposes")]
    Intentional,
    /// The metrics registry could not be encoded.
    #[error("Metrics exposition failed")]
    Exposition(#[from] anyhow::Error),
    /// No route matched the request.
    #[error("Not Found")]
    NotFound,
    /// The route exists but not for this method.
    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Intentional | AppError::Exposition(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Exposition(err) => error!(error = ?err, "Failed to encode metrics"),
            other => debug!(error = %other, "Request failed"),
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Turn a handler panic into a 500 so it is still counted.
///
/// Used with `CatchPanicLayer::custom`, which sits beneath the
/// metrics middleware.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());

    error!(panic = %message, "Handler panicked");

    let body = ErrorBody {
        detail: "Internal Server Error".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
