//! Preprocessing configuration

use crate::data::{CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use serde::{Deserialize, Serialize};

/// Which input columns pass through and which are one-hot encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessingConfig {
    /// Numeric columns copied into the feature matrix unchanged
    pub passthrough_columns: Vec<String>,

    /// Categorical columns expanded into indicator columns
    pub categorical_columns: Vec<String>,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            passthrough_columns: NUMERIC_FEATURES.iter().map(|c| c.to_string()).collect(),
            categorical_columns: CATEGORICAL_FEATURES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
