//! Draft data loading

use super::{
    numeric_column, required_columns, string_column, TargetColumn, DEFAULT_MAX_YEAR, YEAR_COLUMN,
};
use crate::error::{ProjectorError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Loader for the historical draft CSV
#[derive(Debug, Clone)]
pub struct DraftDataLoader {
    /// Rows with a later draft year are dropped
    max_year: i64,
}

impl Default for DraftDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftDataLoader {
    /// Create a loader with the default year cutoff
    pub fn new() -> Self {
        Self {
            max_year: DEFAULT_MAX_YEAR,
        }
    }

    /// Set the latest draft year to keep
    pub fn with_max_year(mut self, max_year: i64) -> Self {
        self.max_year = max_year;
        self
    }

    /// Load the CSV, check its schema, and drop rows past the year cutoff
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        let start = Instant::now();

        let df = self.read_csv(path)?;
        validate_columns(&df)?;
        let filtered = filter_by_year(&df, self.max_year)?;

        info!(
            path = %path.display(),
            rows_read = df.height(),
            rows_kept = filtered.height(),
            max_year = self.max_year,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded draft data"
        );

        Ok(filtered)
    }

    fn read_csv(&self, path: &Path) -> Result<DataFrame> {
        let file = File::open(path)
            .map_err(|e| ProjectorError::DataError(format!("{}: {}", path.display(), e)))?;

        // Infer column types from every row
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| ProjectorError::DataError(format!("{}: {}", path.display(), e)))
    }
}

/// Fail on the first required column the frame lacks
pub fn validate_columns(df: &DataFrame) -> Result<()> {
    for name in required_columns() {
        if df.column(name).is_err() {
            return Err(ProjectorError::FeatureNotFound(name.to_string()));
        }
    }
    Ok(())
}

/// Keep rows whose draft year is at most `max_year`; rows without a year are dropped
pub fn filter_by_year(df: &DataFrame, max_year: i64) -> Result<DataFrame> {
    if df.column(YEAR_COLUMN).is_err() {
        return Err(ProjectorError::FeatureNotFound(YEAR_COLUMN.to_string()));
    }

    let filtered = df
        .clone()
        .lazy()
        .filter(col(YEAR_COLUMN).lt_eq(lit(max_year)))
        .collect()?;

    debug!(before = df.height(), after = filtered.height(), max_year, "Filtered by draft year");
    Ok(filtered)
}

/// Build the target matrix in [`TargetColumn`] order.
///
/// Skaters have no goalie statistics and goalies have no skater statistics, so
/// missing target cells count as zero.
pub fn extract_targets(df: &DataFrame) -> Result<Array2<f64>> {
    let mut targets = Array2::zeros((df.height(), TargetColumn::COUNT));

    for target in TargetColumn::ALL {
        let values = numeric_column(df, target.name())?;
        for (row, value) in values.into_iter().enumerate() {
            targets[[row, target.index()]] = value.filter(|v| !v.is_nan()).unwrap_or(0.0);
        }
    }

    Ok(targets)
}

/// Overview of a loaded dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub first_year: Option<i64>,
    pub last_year: Option<i64>,
    pub position_counts: BTreeMap<String, usize>,
    pub nationality_counts: BTreeMap<String, usize>,
}

impl DatasetSummary {
    /// Summarize a draft frame
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let years: Vec<i64> = numeric_column(df, YEAR_COLUMN)?
            .into_iter()
            .flatten()
            .map(|y| y as i64)
            .collect();

        Ok(Self {
            n_rows: df.height(),
            first_year: years.iter().copied().min(),
            last_year: years.iter().copied().max(),
            position_counts: count_values(df, "position")?,
            nationality_counts: count_values(df, "nationality")?,
        })
    }
}

fn count_values(df: &DataFrame, name: &str) -> Result<BTreeMap<String, usize>> {
    let mut counts = BTreeMap::new();
    for value in string_column(df, name)?.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }
    Ok(counts)
}
