//! Traffic Client Port - Outbound Request Interface
//!
//! Defines the trait the traffic generator uses to hit the target
//! service. The reqwest adapter implements it over HTTP.

use async_trait::async_trait;

/// Issues a single GET against the target service.
#[async_trait]
pub trait TrafficClient: Send + Sync + 'static {
  /// GET `path` relative to the configured base URL.
  ///
  /// Returns the response status code. Non-2xx statuses are NOT
  /// errors; only transport failures (timeout, refused connection,
  /// DNS) are.
  async fn get(&self, path: &str) -> anyhow::Result<u16>;
}
