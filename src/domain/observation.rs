//! Request observation - one completed request, before aggregation.
//!
//! An observation is created by the instrumentation middleware after
//! the downstream pipeline produced a response, folded into the
//! metrics registry and then dropped. It never outlives the request.

use std::time::Duration;

/// Label value used when a request matched no registered route.
///
/// Collapsing all unknown paths into one value keeps the label set
/// bounded no matter what clients send.
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Label value used for any method outside the standard set.
pub const OTHER_METHOD: &str = "other";

/// Methods that keep their own label value.
const STANDARD_METHODS: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "CONNECT", "TRACE",
];

/// Method as a label value: standard methods pass through, extension
/// methods collapse into [`OTHER_METHOD`].
pub fn method_label(method: &str) -> &str {
    if STANDARD_METHODS.contains(&method) {
        method
    } else {
        OTHER_METHOD
    }
}

/// Status codes at or above this value count as errors.
pub const ERROR_STATUS_THRESHOLD: u16 = 400;

/// Outcome of a single request as seen by the middleware.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestObservation {
    /// HTTP method label (e.g., "GET", or [`OTHER_METHOD`]).
    pub method: String,
    /// Route template the request matched, or [`UNMATCHED_ENDPOINT`].
    pub endpoint: String,
    /// Final response status code.
    pub status: u16,
    /// Wall time spent awaiting the downstream pipeline.
    pub elapsed: Duration,
}

impl RequestObservation {
    /// Build an observation from its raw parts.
    pub fn new(
        method: impl Into<String>,
        endpoint: impl Into<String>,
        status: u16,
        elapsed: Duration,
    ) -> Self {
        Self {
            method: method.into(),
            endpoint: endpoint.into(),
            status,
            elapsed,
        }
    }

    /// Whether this request ended with a 4xx/5xx status.
    pub fn is_error(&self) -> bool {
        self.status >= ERROR_STATUS_THRESHOLD
    }

    /// Elapsed time in seconds, the unit of the latency histogram.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Status code rendered as a label value.
    pub fn status_label(&self) -> String {
        self.status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_threshold_boundaries() {
        let at = |status| RequestObservation::new("GET", "/ping", status, Duration::ZERO);

        assert!(!at(200).is_error());
        assert!(!at(399).is_error());
        assert!(at(400).is_error());
        assert!(at(404).is_error());
        assert!(at(500).is_error());
    }

    #[test]
    fn test_elapsed_seconds_sub_millisecond() {
        let obs = RequestObservation::new("GET", "/ping", 200, Duration::from_micros(250));
        assert!((obs.elapsed_seconds() - 0.000_25).abs() < 1e-12);
    }

    #[test]
    fn test_method_label_collapses_extensions() {
        assert_eq!(method_label("GET"), "GET");
        assert_eq!(method_label("DELETE"), "DELETE");
        assert_eq!(method_label("XYZ123"), OTHER_METHOD);
        assert_eq!(method_label("PROPFIND"), OTHER_METHOD);
        assert_eq!(method_label("get"), OTHER_METHOD);
    }

    #[test]
    fn test_status_label() {
        let obs = RequestObservation::new("GET", "/error", 500, Duration::ZERO);
        assert_eq!(obs.status_label(), "500");
    }
}
