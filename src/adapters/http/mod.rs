//! HTTP Adapter - Instrumented Demo Service
//!
//! Serves the health, error, metrics and info endpoints via axum
//! 0.7, with every request passing through the Prometheus
//! instrumentation middleware.
//!
//! Sub-modules:
//! - `error`: Handler error to response mapping
//! - `handlers`: Endpoint handlers
//! - `middleware`: Request metrics middleware
//! - `server`: Router composition and server lifecycle

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

use std::sync::Arc;

use crate::domain::service::ServiceInfo;
use crate::ports::metrics::MetricsSink;

pub use error::AppError;
pub use server::{build_router, instrument_router, HttpServer};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Metrics sink, shared with the middleware.
    pub metrics: Arc<dyn MetricsSink>,
    /// Descriptor served at `/`.
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    /// Bundle the sink and descriptor.
    pub fn new(metrics: Arc<dyn MetricsSink>, info: ServiceInfo) -> Self {
        Self {
            metrics,
            info: Arc::new(info),
        }
    }
}
