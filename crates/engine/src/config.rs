//! Engine configuration.
//!
//! All tunables live here with the historical defaults; a config file is
//! optional and anything not set falls back to these values.

use crate::combine::SourceWeights;
use serde::{Deserialize, Serialize};

/// Minimum similarity for a collaborative neighbor and minimum score for
/// emitted candidates.
pub const MIN_SIMILARITY_THRESHOLD: f64 = 0.1;
/// Neighbors considered per collaborative request.
pub const MAX_NEIGHBORS: usize = 20;
/// Per-scorer candidate cap.
pub const MAX_CANDIDATES: usize = 50;
/// Default diversity factor for the diversity filter.
pub const DEFAULT_DIVERSITY_FACTOR: f64 = 0.3;
/// Default number of recommendations returned.
pub const DEFAULT_LIMIT: usize = 10;
/// Cache TTL for recommendation lists, in seconds (30 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 1800;

/// Tunable engine parameters, TOML-loadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-source combination weights.
    pub weights: SourceWeights,
    /// Similarity/score floor shared by the scorers.
    pub min_similarity_threshold: f64,
    /// Collaborative neighbor cap.
    pub max_neighbors: usize,
    /// Per-scorer candidate cap.
    pub max_candidates: usize,
    /// Diversity factor used when a request does not override it.
    pub diversity_factor: f64,
    /// Result limit used when a request does not override it.
    pub default_limit: usize,
    /// Cache TTL in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: SourceWeights::default(),
            min_similarity_threshold: MIN_SIMILARITY_THRESHOLD,
            max_neighbors: MAX_NEIGHBORS,
            max_candidates: MAX_CANDIDATES,
            diversity_factor: DEFAULT_DIVERSITY_FACTOR,
            default_limit: DEFAULT_LIMIT,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML, filling anything unset with defaults.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.weights.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_historical_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.min_similarity_threshold, 0.1);
        assert_eq!(config.max_neighbors, 20);
        assert_eq!(config.max_candidates, 50);
        assert_eq!(config.diversity_factor, 0.3);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.cache_ttl_secs, 1800);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = EngineConfig::from_toml_str("default_limit = 5").unwrap();
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.cache_ttl_secs, 1800);
    }

    #[test]
    fn bad_weights_are_rejected() {
        let raw = "[weights]\ncollaborative = 0.9\ncontent = 0.9\nmarket = 0.1\nbehavioral = 0.1";
        assert!(EngineConfig::from_toml_str(raw).is_err());
    }
}
