//! Backend reachability utilities.
//!
//! Probes the task store's health endpoints so the CLI can show a
//! "Backend Required" boundary state instead of a raw transport error.

use std::time::Duration;

use super::config::Config;

/// Reachability of the remote task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// Health endpoint answered
    Reachable,
    /// Connection refused, timed out, or DNS failure
    Unreachable,
}

impl BackendStatus {
    /// Check if the backend answered.
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }
}

/// Probe for a single backend endpoint.
#[derive(Debug, Clone)]
pub struct BackendProbe {
    /// Human-readable name shown in doctor output.
    pub name: String,
    /// URL to probe.
    pub url: String,
    /// Timeout for the probe.
    pub timeout: Duration,
}

impl BackendProbe {
    /// Create a probe for an arbitrary endpoint.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into(), timeout: Duration::from_secs(5) }
    }

    /// Probe for the store's health endpoint.
    pub fn health(config: &Config) -> Self {
        Self::new("Task store", config.health_url())
    }

    /// Probe for the store's database connectivity endpoint.
    pub fn database(config: &Config) -> Self {
        Self::new("Database", config.db_test_url())
    }

    /// Check whether the endpoint answers at all.
    ///
    /// An auth rejection still means the backend is up, so 401/403 count
    /// as reachable.
    pub async fn check(&self) -> BackendStatus {
        let client = match reqwest::Client::builder().timeout(self.timeout).build() {
            Ok(c) => c,
            Err(_) => return BackendStatus::Unreachable,
        };

        match client.get(&self.url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if (200..300).contains(&status) || status == 401 || status == 403 {
                    BackendStatus::Reachable
                } else {
                    BackendStatus::Unreachable
                }
            }
            Err(_) => BackendStatus::Unreachable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_status() {
        assert!(BackendStatus::Reachable.is_reachable());
        assert!(!BackendStatus::Unreachable.is_reachable());
    }

    #[test]
    fn test_probe_urls_derive_from_config() {
        let config = Config::default();
        let health = BackendProbe::health(&config);
        assert_eq!(health.url, "http://localhost:3000/health");
        let db = BackendProbe::database(&config);
        assert_eq!(db.url, "http://localhost:3000/db-test");
    }

    #[test]
    fn test_probe_default_timeout() {
        let probe = BackendProbe::new("test", "http://localhost:9");
        assert_eq!(probe.timeout, Duration::from_secs(5));
    }
}
