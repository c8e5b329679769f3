//! Metrics Benchmarks — Per-Request Recording Cost
//!
//! Benchmarks the work the middleware adds to every request and the
//! cost of a scrape.
//!
//! Run with: cargo bench --bench metrics_bench

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tower::ServiceExt;

use observability_demo::adapters::http::{build_router, AppState};
use observability_demo::adapters::metrics::MetricsRegistry;
use observability_demo::domain::observation::RequestObservation;
use observability_demo::domain::service::ServiceInfo;
use observability_demo::domain::traffic::TargetSelector;
use observability_demo::ports::metrics::MetricsSink;

/// Benchmark recording a successful request.
fn bench_record_success(c: &mut Criterion) {
    let registry = MetricsRegistry::with_default_buckets().unwrap();
    let obs = RequestObservation::new("GET", "/ping", 200, Duration::from_micros(420));

    c.bench_function("record_success", |b| {
        b.iter(|| registry.record(black_box(&obs)));
    });
}

/// Benchmark recording a failed request (three updates).
fn bench_record_error(c: &mut Criterion) {
    let registry = MetricsRegistry::with_default_buckets().unwrap();
    let obs = RequestObservation::new("GET", "/error", 500, Duration::from_micros(420));

    c.bench_function("record_error", |b| {
        b.iter(|| registry.record(black_box(&obs)));
    });
}

/// Benchmark encoding a populated registry.
fn bench_encode(c: &mut Criterion) {
    let registry = MetricsRegistry::with_default_buckets().unwrap();
    for endpoint in ["/", "/ping", "/error", "/metrics"] {
        registry.record(&RequestObservation::new("GET", endpoint, 200, Duration::from_millis(1)));
    }

    c.bench_function("encode_exposition", |b| {
        b.iter(|| black_box(registry.encode().unwrap()));
    });
}

/// Benchmark target selection.
fn bench_select_target(c: &mut Criterion) {
    let mut selector = TargetSelector::seeded(42, 0.2);

    c.bench_function("select_target", |b| {
        b.iter(|| black_box(selector.next_target()));
    });
}

/// Benchmark a full in-process /ping through the instrumented router.
fn bench_instrumented_ping(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let registry = Arc::new(MetricsRegistry::with_default_buckets().unwrap());
    let app = build_router(AppState::new(registry, ServiceInfo::new("bench", "0")));

    c.bench_function("instrumented_ping", |b| {
        b.to_async(&runtime).iter(|| {
            let app = app.clone();
            async move {
                let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();
                black_box(app.oneshot(request).await.unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_record_success,
    bench_record_error,
    bench_encode,
    bench_select_target,
    bench_instrumented_ping,
);
criterion_main!(benches);
