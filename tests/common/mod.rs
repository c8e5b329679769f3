//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use observability_demo::adapters::http::{build_router, AppState};
use observability_demo::adapters::metrics::MetricsRegistry;
use observability_demo::domain::service::ServiceInfo;

/// Response parts collected from a oneshot request.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }
}

pub fn service_info() -> ServiceInfo {
    ServiceInfo::new("observability-demo-app", "1.0.0")
}

/// Full router backed by a fresh registry.
pub fn app() -> (Router, Arc<MetricsRegistry>) {
    let registry = Arc::new(MetricsRegistry::with_default_buckets().unwrap());
    let state = AppState::new(registry.clone(), service_info());
    (build_router(state), registry)
}

/// Send a GET through the router without a network listener.
pub async fn get(app: &Router, path: &str) -> TestResponse {
    send(app, Method::GET, path).await
}

/// Send a bodiless request with any method through the router.
pub async fn send(app: &Router, method: Method, path: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Value of the first sample of `name` carrying all `labels`.
pub fn sample(exposition: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    exposition
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (series, value) = line.rsplit_once(' ')?;
            let (metric, label_text) = series.split_once('{')?;
            if metric != name {
                return None;
            }
            let matches = labels
                .iter()
                .all(|(key, val)| label_text.contains(&format!("{key}=\"{val}\"")));
            if matches { value.parse().ok() } else { None }
        })
}

/// Sample lines mentioning `endpoint="<endpoint>"`.
pub fn lines_for_endpoint<'a>(exposition: &'a str, endpoint: &str) -> Vec<&'a str> {
    let needle = format!("endpoint=\"{endpoint}\"");
    exposition
        .lines()
        .filter(|line| line.contains(&needle))
        .collect()
}
