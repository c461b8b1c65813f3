//! Feature preprocessing pipeline
//!
//! Output columns are the passthrough columns in configured order, followed by
//! the indicator columns of each categorical column.

use super::{OneHotEncoder, PreprocessingConfig};
use crate::data::numeric_column;
use crate::error::{ProjectorError, Result};
use ndarray::{concatenate, Array2, Axis};
use polars::prelude::*;
use tracing::debug;

/// Passthrough + one-hot column transformer
#[derive(Debug, Clone)]
pub struct FeaturePreprocessor {
    config: PreprocessingConfig,
    encoder: OneHotEncoder,
    feature_names: Vec<String>,
    is_fitted: bool,
}

impl Default for FeaturePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeaturePreprocessor {
    /// Create a preprocessor for the draft feature columns
    pub fn new() -> Self {
        Self::with_config(PreprocessingConfig::default())
    }

    /// Create a preprocessor with a custom column layout
    pub fn with_config(config: PreprocessingConfig) -> Self {
        Self {
            config,
            encoder: OneHotEncoder::new(),
            feature_names: Vec::new(),
            is_fitted: false,
        }
    }

    /// Learn the categorical vocabulary, then transform
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        let categorical: Vec<&str> = self
            .config
            .categorical_columns
            .iter()
            .map(String::as_str)
            .collect();
        self.encoder.fit(df, &categorical)?;

        self.feature_names = self
            .config
            .passthrough_columns
            .iter()
            .cloned()
            .chain(self.encoder.feature_names())
            .collect();
        self.is_fitted = true;

        debug!(
            n_rows = df.height(),
            n_features = self.feature_names.len(),
            "Fitted feature preprocessor"
        );

        self.transform(df)
    }

    /// Transform with the learned vocabulary
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ProjectorError::ModelNotFitted);
        }

        let passthrough = self.passthrough(df)?;
        let encoded = self.encoder.transform(df)?;

        Ok(concatenate(Axis(1), &[passthrough.view(), encoded.view()])?)
    }

    fn passthrough(&self, df: &DataFrame) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((df.height(), self.config.passthrough_columns.len()));

        for (j, name) in self.config.passthrough_columns.iter().enumerate() {
            for (row, value) in numeric_column(df, name)?.into_iter().enumerate() {
                out[[row, j]] = value.ok_or_else(|| {
                    ProjectorError::DataError(format!(
                        "column '{}' has a missing value at row {}",
                        name, row
                    ))
                })?;
            }
        }

        Ok(out)
    }

    /// Output column names in matrix order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Learned categories of a categorical column
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.encoder.categories(column)
    }
}
