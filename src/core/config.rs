//! Configuration management for Buildboard.
//!
//! Handles loading and saving configuration from TOML files, with
//! environment-variable overrides for the API base URL and identity.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default task-store base URL, matching the backend's dev setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

/// Environment variable overriding the base URL (shared with the web client).
pub const BASE_URL_ENV: &str = "VITE_API_BASE_URL";

/// Environment variable overriding the acting wallet address.
pub const ADDRESS_ENV: &str = "BUILDBOARD_ADDRESS";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Task-store API settings
    pub api: ApiConfig,

    /// Acting identity
    pub identity: IdentityConfig,
}

/// Remote task-store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/api/v1` prefix
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout_secs: 10 }
    }
}

/// Acting identity settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Wallet address sent as `x-user-address` on every request
    pub address: Option<String>,
}

impl Config {
    /// Load configuration from the default path, applying env overrides.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Load from a specific file (no env overrides), used in tests.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Path to the config file: `<config dir>/buildboard/config.toml`.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("buildboard")
            .join("config.toml")
    }

    /// Apply environment overrides (`VITE_API_BASE_URL`, `BUILDBOARD_ADDRESS`).
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(address) = std::env::var(ADDRESS_ENV) {
            if !address.is_empty() {
                self.identity.address = Some(address);
            }
        }
    }

    /// Root of the backend, with the `/api/v1` suffix stripped.
    pub fn server_root(&self) -> String {
        let trimmed = self.api.base_url.trim_end_matches('/');
        trimmed.strip_suffix("/api/v1").unwrap_or(trimmed).to_string()
    }

    /// Health probe endpoint, outside the versioned API prefix.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.server_root())
    }

    /// Database connectivity probe endpoint.
    pub fn db_test_url(&self) -> String {
        format!("{}/db-test", self.server_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.identity.address.is_none());
    }

    #[test]
    fn test_health_url_strips_api_prefix() {
        let config = Config::default();
        assert_eq!(config.health_url(), "http://localhost:3000/health");
        assert_eq!(config.db_test_url(), "http://localhost:3000/db-test");
    }

    #[test]
    fn test_server_root_tolerates_trailing_slash() {
        let mut config = Config::default();
        config.api.base_url = "https://api.example.com/api/v1/".to_string();
        assert_eq!(config.health_url(), "https://api.example.com/health");
    }

    #[test]
    fn test_server_root_without_api_prefix() {
        let mut config = Config::default();
        config.api.base_url = "http://localhost:4000".to_string();
        assert_eq!(config.server_root(), "http://localhost:4000");
    }

    #[test]
    #[serial(buildboard_env)]
    fn test_env_override_base_url() {
        let original = std::env::var(BASE_URL_ENV).ok();
        std::env::set_var(BASE_URL_ENV, "http://staging:3000/api/v1");

        let mut config = Config::default();
        config.apply_env();

        match original {
            Some(val) => std::env::set_var(BASE_URL_ENV, val),
            None => std::env::remove_var(BASE_URL_ENV),
        }

        assert_eq!(config.api.base_url, "http://staging:3000/api/v1");
    }

    #[test]
    #[serial(buildboard_env)]
    fn test_empty_env_value_is_ignored() {
        let original = std::env::var(BASE_URL_ENV).ok();
        std::env::set_var(BASE_URL_ENV, "");

        let mut config = Config::default();
        config.apply_env();

        match original {
            Some(val) => std::env::set_var(BASE_URL_ENV, val),
            None => std::env::remove_var(BASE_URL_ENV),
        }

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://example.com/api/v1".to_string();
        config.identity.address = Some("0xABC".to_string());
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "http://example.com/api/v1");
        assert_eq!(loaded.identity.address.as_deref(), Some("0xABC"));
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"http://x/api/v1\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://x/api/v1");
        assert_eq!(config.api.timeout_secs, 10);
    }
}
