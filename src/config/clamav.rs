//! ClamAV service configuration.

use serde::{Deserialize, Serialize};

/// Configuration of a remote ClamAV scanning service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClamAvConfig {
    /// Base URL of the scanning service.
    service_url: String,
}

impl ClamAvConfig {
    /// Creates a configuration for the service at `service_url`.
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
        }
    }

    /// Sets the service URL.
    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self
    }

    /// Returns the service URL.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClamAvConfig::new("http://a:8080").with_service_url("http://b:8080");
        assert_eq!(config.service_url(), "http://b:8080");
    }

    #[test]
    fn test_deserialize() {
        let config: ClamAvConfig = toml::from_str(r#"service_url = "http://clamav:3310""#).unwrap();
        assert_eq!(config.service_url(), "http://clamav:3310");
    }
}
