//! Traffic Adapters
//!
//! HTTP implementation of the `TrafficClient` port.

pub mod client;

pub use client::{HttpTrafficClient, HttpTrafficClientConfig};
