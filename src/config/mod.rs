//! Configuration Module - TOML-based Service Configuration
//!
//! Every field has a default, so the service and the traffic
//! generator run with no config file at all. An optional
//! `config.toml` can override the defaults, and the `BASE_URL`
//! environment variable overrides the generator's target.

pub mod loader;

use serde::Deserialize;

use crate::adapters::metrics::prometheus::DEFAULT_LATENCY_BUCKETS;
use crate::domain::traffic::DEFAULT_ERROR_RATIO;

/// Top-level configuration shared by both binaries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Demo service identity and bind address.
  pub service: ServiceConfig,
  /// Metric registry settings.
  pub metrics: MetricsConfig,
  /// Traffic generator settings.
  pub traffic: TrafficConfig,
}

/// Demo service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Name reported by the root endpoint.
  #[serde(default = "default_service_name")]
  pub name: String,
  /// HTTP bind address.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Metric registry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Latency histogram bucket bounds in seconds.
  #[serde(default = "default_latency_buckets")]
  pub latency_buckets: Vec<f64>,
}

/// Traffic generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficConfig {
  /// Base URL of the target service.
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Share of requests sent to the failing endpoint.
  #[serde(default = "default_error_ratio")]
  pub error_ratio: f64,
  /// Pause between requests (milliseconds).
  #[serde(default = "default_interval_ms")]
  pub interval_ms: u64,
  /// Client-side request timeout (milliseconds).
  #[serde(default = "default_timeout_ms")]
  pub timeout_ms: u64,
  /// Iterations between summary log lines (0 disables).
  #[serde(default = "default_summary_every")]
  pub summary_every: u64,
  /// Log level for the generator process.
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      name: default_service_name(),
      bind_address: default_bind_address(),
      log_level: default_log_level(),
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      latency_buckets: default_latency_buckets(),
    }
  }
}

impl Default for TrafficConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      error_ratio: default_error_ratio(),
      interval_ms: default_interval_ms(),
      timeout_ms: default_timeout_ms(),
      summary_every: default_summary_every(),
      log_level: default_log_level(),
    }
  }
}

// Default value functions for serde

fn default_service_name() -> String {
  "observability-demo-app".to_string()
}

fn default_bind_address() -> String {
  "0.0.0.0:8000".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_latency_buckets() -> Vec<f64> {
  DEFAULT_LATENCY_BUCKETS.to_vec()
}

fn default_base_url() -> String {
  "http://demo_app:8000".to_string()
}

fn default_error_ratio() -> f64 {
  DEFAULT_ERROR_RATIO
}

fn default_interval_ms() -> u64 {
  1_000
}

fn default_timeout_ms() -> u64 {
  2_000
}

fn default_summary_every() -> u64 {
  60
}
