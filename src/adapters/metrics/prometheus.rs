//! Prometheus Metrics Registry - HTTP Request Observability
//!
//! Owns a private Prometheus registry holding the three request
//! metrics recorded by the instrumentation middleware, and encodes
//! them in the text exposition format for the `/metrics` endpoint.
//!
//! Metric names and label keys follow the conventional
//! `http_requests_total` / `http_request_duration_seconds` /
//! `http_errors_total` triple so existing dashboards and alert rules
//! apply unchanged.

use anyhow::Context;
use prometheus::proto::{Metric, MetricFamily};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::domain::observation::RequestObservation;
use crate::ports::metrics::{Exposition, MetricsSink};

/// Latency buckets in seconds, matching the standard client default.
pub const DEFAULT_LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

const REQUESTS_TOTAL: &str = "http_requests_total";
const REQUEST_DURATION: &str = "http_request_duration_seconds";
const ERRORS_TOTAL: &str = "http_errors_total";

/// Centralized Prometheus metrics for the demo service.
///
/// Constructed once by the composition root and shared behind an
/// `Arc`. The metric vectors synchronize internally, so recording
/// needs only `&self`.
pub struct MetricsRegistry {
    /// Prometheus registry (private, never the global default).
    registry: Registry,
    /// Completed requests by method, endpoint and status code.
    pub http_requests_total: IntCounterVec,
    /// Request latency in seconds by method and endpoint.
    ///
    /// Status is left out of this label set to bound cardinality.
    pub http_request_duration_seconds: HistogramVec,
    /// Requests that ended with a 4xx/5xx status.
    pub http_errors_total: IntCounterVec,
}

impl MetricsRegistry {
    /// Create and register all request metrics.
    ///
    /// # Errors
    /// Fails if `latency_buckets` is empty or not strictly increasing.
    pub fn new(latency_buckets: &[f64]) -> anyhow::Result<Self> {
        validate_buckets(latency_buckets)?;

        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new(REQUESTS_TOTAL, "Total number of HTTP requests"),
            &["method", "endpoint", "status_code"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION, "HTTP request latency in seconds")
                .buckets(latency_buckets.to_vec()),
            &["method", "endpoint"],
        )?;

        let http_errors_total = IntCounterVec::new(
            Opts::new(ERRORS_TOTAL, "Total number of HTTP errors"),
            &["method", "endpoint", "status_code"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_errors_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_errors_total,
        })
    }

    /// Registry with [`DEFAULT_LATENCY_BUCKETS`].
    pub fn with_default_buckets() -> anyhow::Result<Self> {
        Self::new(DEFAULT_LATENCY_BUCKETS)
    }

    /// Encode every registered family in the text exposition format.
    pub fn encode(&self) -> anyhow::Result<Exposition> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("Failed to encode metric families")?;

        Ok(Exposition {
            content_type: encoder.format_type().to_string(),
            body: buffer,
        })
    }

    /// Current `http_requests_total` value for one label set (0 if unseen).
    pub fn request_count(&self, method: &str, endpoint: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.find_sample(
            REQUESTS_TOTAL,
            &[("method", method), ("endpoint", endpoint), ("status_code", &status)],
        )
        .map(|m| m.get_counter().get_value() as u64)
        .unwrap_or(0)
    }

    /// Current `http_errors_total` value for one label set (0 if unseen).
    pub fn error_count(&self, method: &str, endpoint: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.find_sample(
            ERRORS_TOTAL,
            &[("method", method), ("endpoint", endpoint), ("status_code", &status)],
        )
        .map(|m| m.get_counter().get_value() as u64)
        .unwrap_or(0)
    }

    /// Number of latency observations for a method/endpoint pair.
    pub fn latency_count(&self, method: &str, endpoint: &str) -> u64 {
        self.find_sample(REQUEST_DURATION, &[("method", method), ("endpoint", endpoint)])
            .map(|m| m.get_histogram().get_sample_count())
            .unwrap_or(0)
    }

    /// Sum of latency observations (seconds) for a method/endpoint pair.
    pub fn latency_sum(&self, method: &str, endpoint: &str) -> f64 {
        self.find_sample(REQUEST_DURATION, &[("method", method), ("endpoint", endpoint)])
            .map(|m| m.get_histogram().get_sample_sum())
            .unwrap_or(0.0)
    }

    /// Look up a sample through `gather()`.
    ///
    /// `get_metric_with_label_values` would create a zero-valued child
    /// as a side effect, which then shows up in the exposition.
    fn find_sample(&self, family: &str, labels: &[(&str, &str)]) -> Option<Metric> {
        self.registry
            .gather()
            .into_iter()
            .find(|mf: &MetricFamily| mf.get_name() == family)?
            .get_metric()
            .iter()
            .find(|metric| {
                labels.iter().all(|(name, value)| {
                    metric
                        .get_label()
                        .iter()
                        .any(|pair| pair.get_name() == *name && pair.get_value() == *value)
                })
            })
            .cloned()
    }
}

/// Histogram children are created lazily, so bad buckets would only
/// surface as a panic on the first request. Reject them up front.
fn validate_buckets(buckets: &[f64]) -> anyhow::Result<()> {
    anyhow::ensure!(!buckets.is_empty(), "Latency buckets must not be empty");
    anyhow::ensure!(
        buckets.windows(2).all(|pair| pair[0] < pair[1]),
        "Latency buckets must be strictly increasing, got {buckets:?}"
    );
    Ok(())
}

impl MetricsSink for MetricsRegistry {
    fn record(&self, observation: &RequestObservation) {
        let method = observation.method.as_str();
        let endpoint = observation.endpoint.as_str();
        let status = observation.status_label();

        self.http_requests_total
            .with_label_values(&[method, endpoint, &status])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(observation.elapsed_seconds());

        if observation.is_error() {
            self.http_errors_total
                .with_label_values(&[method, endpoint, &status])
                .inc();
        }
    }

    fn expose(&self) -> anyhow::Result<Exposition> {
        self.encode()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn obs(endpoint: &str, status: u16, millis: u64) -> RequestObservation {
        RequestObservation::new("GET", endpoint, status, Duration::from_millis(millis))
    }

    #[test]
    fn test_success_records_counter_and_latency_only() {
        let registry = MetricsRegistry::with_default_buckets().unwrap();
        registry.record(&obs("/ping", 200, 3));

        assert_eq!(registry.request_count("GET", "/ping", 200), 1);
        assert_eq!(registry.latency_count("GET", "/ping"), 1);
        assert_eq!(registry.error_count("GET", "/ping", 200), 0);
        assert!((registry.latency_sum("GET", "/ping") - 0.003).abs() < 1e-9);
    }

    #[test]
    fn test_error_status_records_all_three() {
        let registry = MetricsRegistry::with_default_buckets().unwrap();
        registry.record(&obs("/error", 500, 1));
        registry.record(&obs("/error", 500, 1));

        assert_eq!(registry.request_count("GET", "/error", 500), 2);
        assert_eq!(registry.error_count("GET", "/error", 500), 2);
        assert_eq!(registry.latency_count("GET", "/error"), 2);
    }

    #[test]
    fn test_latency_histogram_ignores_status() {
        let registry = MetricsRegistry::with_default_buckets().unwrap();
        registry.record(&obs("/ping", 200, 1));
        registry.record(&obs("/ping", 404, 1));

        assert_eq!(registry.request_count("GET", "/ping", 200), 1);
        assert_eq!(registry.request_count("GET", "/ping", 404), 1);
        assert_eq!(registry.latency_count("GET", "/ping"), 2);
    }

    #[test]
    fn test_encode_is_side_effect_free() {
        let registry = MetricsRegistry::with_default_buckets().unwrap();
        registry.record(&obs("/ping", 200, 2));
        registry.record(&obs("/error", 500, 2));

        let first = registry.encode().unwrap();
        let second = registry.encode().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.content_type, prometheus::TEXT_FORMAT);
    }

    #[test]
    fn test_lookup_does_not_create_series() {
        let registry = MetricsRegistry::with_default_buckets().unwrap();
        assert_eq!(registry.request_count("GET", "/nowhere", 200), 0);

        let text = String::from_utf8(registry.encode().unwrap().body).unwrap();
        assert!(!text.contains("/nowhere"));
    }

    #[test]
    fn test_rejects_bad_buckets() {
        assert!(MetricsRegistry::new(&[1.0, 0.5]).is_err());
        assert!(MetricsRegistry::new(&[0.5, 0.5]).is_err());
        assert!(MetricsRegistry::new(&[]).is_err());
    }
}
