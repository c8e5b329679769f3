//! Structured JSON logging shared by both binaries.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Install the global JSON subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .json()
        .try_init()
        .map_err(|err| anyhow!("tracing subscriber init: {err}"))
}
