//! Observability Demo Service — Entry Point
//!
//! Wiring sequence:
//! 1. Load config (optional config.toml, defaults otherwise)
//! 2. Init tracing (JSON structured logging)
//! 3. Build the Prometheus registry (explicit, not global)
//! 4. Serve /, /ping, /error, /metrics behind the metrics middleware
//! 5. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use observability_demo::adapters::http::{AppState, HttpServer};
use observability_demo::adapters::metrics::MetricsRegistry;
use observability_demo::config::loader::{load_config, ConfigScope, DEFAULT_CONFIG_PATH};
use observability_demo::domain::service::ServiceInfo;
use observability_demo::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config = load_config(DEFAULT_CONFIG_PATH, ConfigScope::Service)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    init_tracing(&config.service.log_level)?;

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.service.bind_address,
        "Starting observability demo service"
    );

    // ── 3. Metrics registry, owned here and shared by handle ─
    let metrics = Arc::new(
        MetricsRegistry::new(&config.metrics.latency_buckets)
            .context("Failed to create metrics registry")?,
    );
    let service_info = ServiceInfo::new(config.service.name.clone(), env!("CARGO_PKG_VERSION"));
    let state = AppState::new(metrics, service_info);

    // ── 4. Serve ────────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let server = HttpServer::new(state, config.service.bind_address.clone());
    let mut server_handle = tokio::spawn(server.run(shutdown_rx));

    // ── 5. Wait for SIGINT (or an early server failure) ─────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
            let _ = shutdown_tx.send(());
            match server_handle.await {
                Ok(result) => result?,
                Err(e) => error!(error = %e, "Server task panicked"),
            }
        }
        result = &mut server_handle => {
            result.context("Server task panicked")??;
        }
    }

    info!("Shutdown complete");
    Ok(())
}
