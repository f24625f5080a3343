//! Service configuration
//!
//! Connection settings for the processing service and object store gateways,
//! plus the polling cadence used while waiting on jobs.

use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Processing service base URL (e.g., "http://localhost:8080")
    pub endpoint: String,

    /// Object store base URL (e.g., "http://localhost:9000")
    pub storage_endpoint: String,

    /// How often to poll a job's status while waiting on it
    pub poll_interval: Duration,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl ServiceConfig {
    /// Creates a new configuration with defaults
    pub fn new(endpoint: String, storage_endpoint: String) -> Self {
        Self {
            endpoint,
            storage_endpoint,
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - QUARRY_ENDPOINT (required)
    /// - QUARRY_STORAGE_ENDPOINT (required)
    /// - QUARRY_POLL_INTERVAL (optional, seconds, default: 5)
    /// - QUARRY_REQUEST_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("QUARRY_ENDPOINT")
            .ok_or_else(|| anyhow::anyhow!("QUARRY_ENDPOINT environment variable not set"))?;

        let storage_endpoint = lookup("QUARRY_STORAGE_ENDPOINT")
            .ok_or_else(|| anyhow::anyhow!("QUARRY_STORAGE_ENDPOINT environment variable not set"))?;

        let mut config = Self::new(endpoint, storage_endpoint);

        if let Some(seconds) = lookup("QUARRY_POLL_INTERVAL").and_then(|s| s.parse::<u64>().ok()) {
            config.poll_interval = Duration::from_secs(seconds);
        }

        if let Some(seconds) = lookup("QUARRY_REQUEST_TIMEOUT").and_then(|s| s.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("endpoint", &self.endpoint),
            ("storage_endpoint", &self.storage_endpoint),
        ] {
            if url.is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }

            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(
            "http://localhost:8080".to_string(),
            "http://localhost:9000".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServiceConfig::default();

        config.endpoint = String::new();
        assert!(config.validate().is_err());

        config.endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "https://processing.internal".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("QUARRY_ENDPOINT", "http://processing:8080"),
            ("QUARRY_STORAGE_ENDPOINT", "http://storage:9000"),
            ("QUARRY_POLL_INTERVAL", "10"),
            ("QUARRY_REQUEST_TIMEOUT", "not-a-number"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint, "http://processing:8080");
        assert_eq!(config.storage_endpoint, "http://storage:9000");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_lookup_requires_endpoints() {
        let err = ServiceConfig::from_lookup(lookup_from(&[(
            "QUARRY_ENDPOINT",
            "http://processing:8080",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("QUARRY_STORAGE_ENDPOINT"));
    }
}
