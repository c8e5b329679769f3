//! Traffic HTTP Client - Plain GET Client for Synthetic Load
//!
//! Wraps reqwest with a fixed timeout. No retries, no backoff, no
//! auth: each call is one attempt and any transport failure is
//! handed back to the generator, which ignores it.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::ports::traffic_client::TrafficClient;

/// Configuration for the traffic HTTP client.
#[derive(Debug, Clone)]
pub struct HttpTrafficClientConfig {
  /// Base URL of the target service (no trailing slash needed).
  pub base_url: String,
  /// Per-request timeout.
  pub timeout: Duration,
}

/// reqwest-backed [`TrafficClient`].
pub struct HttpTrafficClient {
  /// Underlying HTTP client.
  http: Client,
  /// Base URL with any trailing slash removed.
  base_url: String,
}

impl HttpTrafficClient {
  /// Create a new traffic client.
  pub fn new(config: HttpTrafficClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(1)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      http,
      base_url: config.base_url.trim_end_matches('/').to_string(),
    })
  }

  /// Base URL requests are sent to.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Full URL for a request path.
  pub fn url_for(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }
}

#[async_trait]
impl TrafficClient for HttpTrafficClient {
  async fn get(&self, path: &str) -> Result<u16> {
    let url = self.url_for(path);
    let response = self
      .http
      .get(&url)
      .send()
      .await
      .with_context(|| format!("GET {url} failed"))?;

    let status = response.status().as_u16();
    debug!(url = %url, status, "traffic request completed");
    Ok(status)
  }
}
