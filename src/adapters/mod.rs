//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (axum, Prometheus, reqwest). Each sub-module
//! groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `http`: The instrumented demo service (routes, middleware, server)
//! - `metrics`: Prometheus registry and text exposition
//! - `traffic`: Outbound HTTP client for the load generator

pub mod http;
pub mod metrics;
pub mod traffic;
