//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the middleware and the
//! traffic generator require from the outside world. Adapters
//! implement these traits.
//!
//! Port categories:
//! - `MetricsSink`: Request metric aggregation and exposition
//! - `TrafficClient`: Outbound HTTP requests for synthetic load

pub mod metrics;
pub mod traffic_client;

pub use metrics::{Exposition, MetricsSink};
pub use traffic_client::TrafficClient;
