//! Training configuration

use super::MaxFeatures;
use crate::preprocessing::PreprocessingConfig;
use serde::{Deserialize, Serialize};

/// Forest and preprocessing settings for a projection model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of trees
    pub n_estimators: usize,
    /// Seed for bootstrap sampling and feature draws
    pub random_state: u64,
    /// Maximum depth per tree
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Features considered at each split
    pub max_features: MaxFeatures,
    /// Feature column layout
    pub preprocessing: PreprocessingConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_state: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::All,
            preprocessing: PreprocessingConfig::default(),
        }
    }
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the number of trees
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Builder method to set the random seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Builder method to cap tree depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder method to set the per-split feature strategy
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    /// Builder method to set the minimum leaf size
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.n_estimators, 100);
        assert_eq!(config.random_state, 42);
        assert_eq!(config.max_features, MaxFeatures::All);
        assert!(config.max_depth.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TrainingConfig::new()
            .with_n_estimators(10)
            .with_random_state(7)
            .with_max_depth(4);

        assert_eq!(config.n_estimators, 10);
        assert_eq!(config.random_state, 7);
        assert_eq!(config.max_depth, Some(4));
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_string(&TrainingConfig::default()).unwrap();
        assert!(json.contains("\"n_estimators\":100"));
    }
}
