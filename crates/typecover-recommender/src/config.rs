//! Configuration for the recommendation search

use serde::{Deserialize, Serialize};

/// Configuration for the [`Recommender`](crate::Recommender)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Maximum number of candidates a search yields
    pub max_results: usize,

    /// Entities requested from the catalog per weak-against type
    pub pool_sample_per_type: usize,

    /// Maximum accepted recommendations sharing one defensive type
    pub type_cap: usize,

    /// Seed for the pool shuffle; a fresh random seed is drawn when unset
    pub seed: Option<u64>,

    /// Whether to run the stat-diversity pass after the coverage passes
    pub diversity_pass: bool,
}

impl RecommenderConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }
        if self.pool_sample_per_type == 0 {
            return Err("pool_sample_per_type must be greater than 0".to_string());
        }
        if self.type_cap == 0 {
            return Err("type_cap must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Coverage-only preset: skips the diversity pass
    pub fn coverage_only() -> Self {
        Self {
            diversity_pass: false,
            ..Self::default()
        }
    }

    /// Reproducible preset with a fixed shuffle seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
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

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            pool_sample_per_type: 60,
            type_cap: 2,
            seed: None,
            diversity_pass: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RecommenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_results, 5);
        assert_eq!(config.type_cap, 2);
    }

    #[test]
    fn test_zero_values_rejected() {
        for config in [
            RecommenderConfig { max_results: 0, ..Default::default() },
            RecommenderConfig { pool_sample_per_type: 0, ..Default::default() },
            RecommenderConfig { type_cap: 0, ..Default::default() },
        ] {
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_presets() {
        assert!(!RecommenderConfig::coverage_only().diversity_pass);
        assert_eq!(RecommenderConfig::seeded(7).seed, Some(7));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RecommenderConfig::seeded(42);
        let parsed = RecommenderConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml() {
        let config = RecommenderConfig::from_toml("type_cap = 3\ndiversity_pass = false").unwrap();
        assert_eq!(config.type_cap, 3);
        assert!(!config.diversity_pass);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.seed, None);
    }
}
