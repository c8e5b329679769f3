//! Service descriptor returned by the root endpoint.

use serde::Serialize;

/// Static description of the service and its public endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Public endpoints by role.
    pub endpoints: EndpointMap,
}

/// Paths of the three functional endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointMap {
    pub health: String,
    pub error: String,
    pub metrics: String,
}

impl ServiceInfo {
    /// Describe the service under the given name and version.
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            endpoints: EndpointMap {
                health: "/ping".to_string(),
                error: "/error".to_string(),
                metrics: "/metrics".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_shape() {
        let info = ServiceInfo::new("observability-demo-app", "1.0.0");
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["service"], "observability-demo-app");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["endpoints"]["health"], "/ping");
        assert_eq!(json["endpoints"]["error"], "/error");
        assert_eq!(json["endpoints"]["metrics"], "/metrics");
    }
}
