//! Configuration Loader - File Loading, Env Overrides and Validation
//!
//! Handles the optional `config.toml`, the `BASE_URL` override, and
//! clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Url;
use tracing::info;

use super::AppConfig;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding the generator's target URL.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Which binary the configuration is loaded for.
///
/// Each binary validates only the sections it consumes, so a bad
/// `BASE_URL` in the service's environment cannot stop it booting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
  /// `demo-app`: `[service]` and `[metrics]`.
  Service,
  /// `traffic-generator`: `[traffic]` plus the `BASE_URL` override.
  Traffic,
}

/// Load, override and validate configuration for one binary.
///
/// A missing file is not an error: defaults are used instead.
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read
/// - TOML parsing fails
/// - Validation rules for `scope` are violated
pub fn load_config(path: &str, scope: ConfigScope) -> Result<AppConfig> {
  load_config_with(path, scope, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(path: &str, scope: ConfigScope, lookup: F) -> Result<AppConfig>
where
  F: Fn(&str) -> Option<String>,
{
  let path = Path::new(path);

  let mut config = if path.exists() {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
      .with_context(|| format!("Failed to parse {}", path.display()))?
  } else {
    AppConfig::default()
  };

  match scope {
    ConfigScope::Service => validate_service_config(&config)?,
    ConfigScope::Traffic => {
      apply_env_overrides(&mut config, lookup);
      validate_traffic_config(&config)?;
    }
  }

  info!(
    file = %path.display(),
    file_found = path.exists(),
    scope = ?scope,
    bind_address = %config.service.bind_address,
    base_url = %config.traffic.base_url,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  toml::from_str(content).context("Invalid configuration TOML")
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Only `BASE_URL` is recognised. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
    config.traffic.base_url = base_url.trim().to_string();
  }
}

/// Validate every section.
pub fn validate_config(config: &AppConfig) -> Result<()> {
  validate_service_config(config)?;
  validate_traffic_config(config)
}

/// Validate the sections read by the service.
///
/// Checks for:
/// - Non-empty service name and bind address
/// - Non-empty, strictly increasing latency buckets
pub fn validate_service_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.service.name.is_empty(),
    "Service name must not be empty"
  );
  anyhow::ensure!(
    !config.service.bind_address.is_empty(),
    "Bind address must not be empty"
  );

  let buckets = &config.metrics.latency_buckets;
  anyhow::ensure!(!buckets.is_empty(), "latency_buckets must not be empty");
  anyhow::ensure!(
    buckets.windows(2).all(|pair| pair[0] < pair[1]),
    "latency_buckets must be strictly increasing, got {:?}",
    buckets
  );

  Ok(())
}

/// Validate the section read by the traffic generator.
///
/// Checks for:
/// - An http(s) base URL
/// - An error ratio in [0, 1] and positive interval/timeout
pub fn validate_traffic_config(config: &AppConfig) -> Result<()> {
  let url = Url::parse(&config.traffic.base_url)
    .with_context(|| format!("Invalid base_url: {}", config.traffic.base_url))?;
  anyhow::ensure!(
    matches!(url.scheme(), "http" | "https"),
    "base_url must use http or https, got {}",
    url.scheme()
  );
  anyhow::ensure!(
    (0.0..=1.0).contains(&config.traffic.error_ratio),
    "error_ratio must be in [0, 1], got {}",
    config.traffic.error_ratio
  );
  anyhow::ensure!(
    config.traffic.interval_ms > 0,
    "interval_ms must be positive"
  );
  anyhow::ensure!(
    config.traffic.timeout_ms > 0,
    "timeout_ms must be positive"
  );

  Ok(())
}
