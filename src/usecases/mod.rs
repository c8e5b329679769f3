//! Use Cases Layer - Application Workflows
//!
//! Orchestrates domain logic with port interfaces.
//!
//! Use cases:
//! - `TrafficGenerator`: Synthetic load loop against the demo service

pub mod traffic_generator;

pub use traffic_generator::{Outcome, TrafficGenerator, TrafficStats};
