//! Projection model: preprocessor + forest fitted together

use super::{RandomForest, TrainingConfig};
use crate::data::extract_targets;
use crate::error::{ProjectorError, Result};
use crate::preprocessing::FeaturePreprocessor;
use crate::projection::{PlayerQuery, Projection};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// What a fit run saw
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_outputs: usize,
    pub n_trees: usize,
    pub training_time_secs: f64,
}

/// Fitted model state: the encoder vocabulary and the trained forest.
///
/// Built once at startup and held for the life of the process.
#[derive(Debug, Clone)]
pub struct ProjectionModel {
    config: TrainingConfig,
    preprocessor: FeaturePreprocessor,
    forest: RandomForest,
    summary: Option<TrainingSummary>,
}

impl ProjectionModel {
    /// Create an unfitted model
    pub fn new(config: TrainingConfig) -> Self {
        let mut forest = RandomForest::new(config.n_estimators)
            .with_random_state(config.random_state)
            .with_min_samples_split(config.min_samples_split)
            .with_min_samples_leaf(config.min_samples_leaf)
            .with_max_features(config.max_features);
        if let Some(depth) = config.max_depth {
            forest = forest.with_max_depth(depth);
        }

        Self {
            preprocessor: FeaturePreprocessor::with_config(config.preprocessing.clone()),
            forest,
            config,
            summary: None,
        }
    }

    /// Fit the preprocessor and the forest on a loaded draft frame
    pub fn fit(&mut self, df: &DataFrame) -> Result<&TrainingSummary> {
        let start = Instant::now();

        let x = self.preprocessor.fit_transform(df)?;
        let y = extract_targets(df)?;
        debug!(rows = x.nrows(), features = x.ncols(), targets = y.ncols(), "Prepared training matrices");

        self.forest.fit(&x, &y)?;

        let summary = TrainingSummary {
            n_samples: x.nrows(),
            n_features: x.ncols(),
            n_outputs: y.ncols(),
            n_trees: self.forest.n_trees(),
            training_time_secs: start.elapsed().as_secs_f64(),
        };

        info!(
            samples = summary.n_samples,
            features = summary.n_features,
            trees = summary.n_trees,
            seed = self.config.random_state,
            elapsed_secs = summary.training_time_secs,
            "Trained projection model"
        );

        Ok(self.summary.insert(summary))
    }

    /// Raw prediction rows in [`TargetColumn`](crate::data::TargetColumn) order
    pub fn predict(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if self.summary.is_none() {
            return Err(ProjectorError::ModelNotFitted);
        }

        let x = self.preprocessor.transform(df)?;
        self.forest.predict(&x)
    }

    /// Project one player's career statistics
    pub fn project(&self, query: &PlayerQuery) -> Result<Projection> {
        let predictions = self.predict(&query.to_frame()?)?;
        debug!(?query, "Projected player");
        Projection::from_row(predictions.row(0))
    }

    /// Feature importances paired with feature names, most important first
    pub fn feature_importances(&self) -> Option<Vec<(String, f64)>> {
        let importances = self.forest.feature_importances()?;
        let mut ranked: Vec<(String, f64)> = self
            .preprocessor
            .feature_names()
            .iter()
            .cloned()
            .zip(importances.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Some(ranked)
    }

    pub fn preprocessor(&self) -> &FeaturePreprocessor {
        &self.preprocessor
    }
}
