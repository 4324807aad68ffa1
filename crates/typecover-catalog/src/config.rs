//! Configuration for the HTTP catalog client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default catalog API base URL
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts for a transient failure
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for [`PokeApiCatalog`](crate::PokeApiCatalog)
///
/// # Examples
///
/// ```
/// use typecover_catalog::CatalogConfig;
///
/// let config = CatalogConfig::from_toml(r#"
///     base_url = "http://localhost:8000/api/v2"
///     timeout_secs = 5
/// "#).unwrap();
/// assert_eq!(config.max_retries, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,

    /// Timeout for a single request (seconds)
    pub timeout_secs: u64,

    /// Attempts per request before a transient failure is returned
    pub max_retries: u32,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl CatalogConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("base_url must be an http(s) URL, got '{}'", self.base_url));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        Ok(())
    }

    /// Patient preset: long timeout and more attempts for slow networks
    pub fn patient() -> Self {
        Self {
            timeout_secs: 90,
            max_retries: 5,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: concat!("typecover/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CatalogConfig::default().validate().is_ok());
        assert!(CatalogConfig::patient().validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = CatalogConfig {
            base_url: "pokeapi.co".to_string(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_retries_rejected() {
        let config = CatalogConfig {
            max_retries: 0,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml("timeout_secs = 5").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CatalogConfig::patient();
        let parsed = CatalogConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
