//! Metrics Sink Port - Request Metrics Recording Interface
//!
//! Defines the trait the instrumentation middleware and the
//! exposition handler depend on. The Prometheus adapter implements
//! it; tests substitute mocks to count recordings.

use crate::domain::observation::RequestObservation;

/// Serialized snapshot of all metrics, ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exposition {
  /// Content type scrapers expect for `body`.
  pub content_type: String,
  /// Encoded metric families.
  pub body: Vec<u8>,
}

/// Aggregating sink for request observations.
///
/// Implementors must be safe to call from many in-flight requests at
/// once; the middleware performs no locking of its own.
pub trait MetricsSink: Send + Sync + 'static {
  /// Fold one completed request into the aggregates.
  ///
  /// Increments the request counter, observes latency, and
  /// increments the error counter for 4xx/5xx statuses.
  fn record(&self, observation: &RequestObservation);

  /// Encode the current aggregate state.
  ///
  /// Must not mutate any metric.
  fn expose(&self) -> anyhow::Result<Exposition>;
}
