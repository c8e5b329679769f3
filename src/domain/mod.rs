//! Domain layer - Core types of the instrumentation demo.
//!
//! Pure data and decision logic with no transport or registry
//! dependencies (hexagonal architecture inner ring). Everything
//! here is testable in isolation.

pub mod observation;
pub mod service;
pub mod traffic;

// Re-export core types for convenience
pub use observation::RequestObservation;
pub use service::{EndpointMap, ServiceInfo};
pub use traffic::{TargetSelector, TrafficTarget};
