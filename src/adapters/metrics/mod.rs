//! Metrics Adapters
//!
//! Prometheus-backed implementation of the `MetricsSink` port.

pub mod prometheus;

pub use self::prometheus::MetricsRegistry;
