//! Traffic Generator — Entry Point
//!
//! Drives one request per interval against the demo service forever.
//! There is deliberately no signal handling; stop the process from
//! outside.

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use observability_demo::adapters::traffic::{HttpTrafficClient, HttpTrafficClientConfig};
use observability_demo::config::loader::{load_config, ConfigScope, DEFAULT_CONFIG_PATH};
use observability_demo::domain::traffic::TargetSelector;
use observability_demo::telemetry::init_tracing;
use observability_demo::usecases::TrafficGenerator;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = load_config(DEFAULT_CONFIG_PATH, ConfigScope::Traffic)
        .context("Failed to load configuration")?;
    init_tracing(&config.traffic.log_level)?;

    let traffic = config.traffic;
    info!(
        base_url = %traffic.base_url,
        error_ratio = traffic.error_ratio,
        interval_ms = traffic.interval_ms,
        timeout_ms = traffic.timeout_ms,
        "Starting traffic generator"
    );

    let client = HttpTrafficClient::new(HttpTrafficClientConfig {
        base_url: traffic.base_url.clone(),
        timeout: Duration::from_millis(traffic.timeout_ms),
    })?;

    TrafficGenerator::new(
        client,
        TargetSelector::from_entropy(traffic.error_ratio),
        Duration::from_millis(traffic.interval_ms),
    )
    .with_summary_every(traffic.summary_every)
    .run()
    .await;

    Ok(())
}
