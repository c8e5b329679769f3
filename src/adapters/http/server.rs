//! HTTP server composition and lifecycle.
//!
//! Layer order, innermost first:
//! 1. endpoint handler
//! 2. `CatchPanicLayer` - panics become 500 responses
//! 3. `track_metrics` - observes the final status and latency
//! 4. `TraceLayer` - request spans for logging
//!
//! Keeping the panic layer beneath the metrics layer means a crashed
//! handler is still counted as a 500.

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use super::error::panic_response;
use super::handlers;
use super::middleware::track_metrics;
use super::AppState;
use crate::ports::metrics::MetricsSink;

/// Build the full service router.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::root).fallback(handlers::method_not_allowed))
        .route("/ping", get(handlers::ping).fallback(handlers::method_not_allowed))
        .route("/error", get(handlers::error).fallback(handlers::method_not_allowed))
        .route("/metrics", get(handlers::metrics).fallback(handlers::method_not_allowed))
        .fallback(handlers::not_found)
        .with_state(state.clone());

    instrument_router(routes, state.metrics).layer(TraceLayer::new_for_http())
}

/// Wrap an already-routed router with panic recovery and metrics.
///
/// Must be called after every route and the fallback are added;
/// routes added later are not instrumented.
pub fn instrument_router(router: Router, sink: Arc<dyn MetricsSink>) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(sink, track_metrics))
}

/// Axum-based demo service.
pub struct HttpServer {
    /// Shared handler state.
    state: AppState,
    /// Bind address (default 0.0.0.0:8000 from config).
    bind_address: String,
}

impl HttpServer {
    /// Create a new server.
    pub fn new(state: AppState, bind_address: impl Into<String>) -> Self {
        Self {
            state,
            bind_address: bind_address.into(),
        }
    }

    /// Bind the configured address and serve until shutdown.
    #[instrument(skip(self, shutdown_rx), fields(address = %self.bind_address))]
    pub async fn run(self, shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.bind_address).await?;
        self.run_on(listener, shutdown_rx).await
    }

    /// Serve on an already-bound listener until shutdown.
    pub async fn run_on(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let app = build_router(self.state);

        info!(address = %listener.local_addr()?, "Demo service started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        info!("Demo service stopped");
        Ok(())
    }
}
