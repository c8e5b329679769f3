//! Request instrumentation middleware.
//!
//! Times the whole downstream pipeline and folds one observation per
//! completed request into the metrics sink. The response passes
//! through untouched.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::trace;

use crate::domain::observation::{method_label, RequestObservation, UNMATCHED_ENDPOINT};
use crate::ports::metrics::MetricsSink;

/// Record request count, latency and errors for every request.
///
/// Nothing is recorded if the inner service never yields a response.
/// Panics are turned into 500s by the layer beneath this one, so they
/// do reach this point.
pub async fn track_metrics(
    State(sink): State<Arc<dyn MetricsSink>>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = method_label(request.method().as_str()).to_string();
    let endpoint = endpoint_label(&request);

    let response = next.run(request).await;

    let observation = RequestObservation::new(
        method,
        endpoint,
        response.status().as_u16(),
        start.elapsed(),
    );
    trace!(
        method = %observation.method,
        endpoint = %observation.endpoint,
        status = observation.status,
        elapsed_ms = observation.elapsed.as_secs_f64() * 1000.0,
        "request observed"
    );
    sink.record(&observation);

    response
}

/// Route template for the request, never the raw path.
fn endpoint_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string())
}
