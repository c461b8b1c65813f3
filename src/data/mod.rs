//! Draft dataset schema and column access
//!
//! The historical dataset has one row per drafted player. Four columns feed the
//! model as features and thirteen are regression targets. [`TargetColumn`]
//! fixes the target order: the forest is trained against targets in this order,
//! and predictions are decoded from it by name, never by hand-written index.

mod loader;

pub use loader::{
    extract_targets, filter_by_year, validate_columns, DatasetSummary, DraftDataLoader,
};

use crate::error::{ProjectorError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Default location of the historical draft data
pub const DEFAULT_DATA_PATH: &str = "data/final_nhl_data.csv";

/// Latest draft year used for training; later drafts have incomplete careers
pub const DEFAULT_MAX_YEAR: i64 = 2015;

/// Column holding the draft year
pub const YEAR_COLUMN: &str = "year";

/// Numeric features forwarded to the model unchanged
pub const NUMERIC_FEATURES: [&str; 2] = ["overall_pick", "age"];

/// Categorical features expanded into indicator columns
pub const CATEGORICAL_FEATURES: [&str; 2] = ["position", "nationality"];

/// Regression targets, in training order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetColumn {
    Year,
    ToYear,
    GamesPlayed,
    Goals,
    Assists,
    Points,
    PlusMinus,
    GoalieGamesPlayed,
    GoalieWins,
    GoalieLosses,
    GoalieTiesOvertime,
    SavePercentage,
    GoalsAgainstAverage,
}

impl TargetColumn {
    /// Number of regression targets
    pub const COUNT: usize = 13;

    /// All targets in training order
    pub const ALL: [TargetColumn; Self::COUNT] = [
        TargetColumn::Year,
        TargetColumn::ToYear,
        TargetColumn::GamesPlayed,
        TargetColumn::Goals,
        TargetColumn::Assists,
        TargetColumn::Points,
        TargetColumn::PlusMinus,
        TargetColumn::GoalieGamesPlayed,
        TargetColumn::GoalieWins,
        TargetColumn::GoalieLosses,
        TargetColumn::GoalieTiesOvertime,
        TargetColumn::SavePercentage,
        TargetColumn::GoalsAgainstAverage,
    ];

    /// CSV column name
    pub fn name(self) -> &'static str {
        match self {
            TargetColumn::Year => "year",
            TargetColumn::ToYear => "to_year",
            TargetColumn::GamesPlayed => "games_played",
            TargetColumn::Goals => "goals",
            TargetColumn::Assists => "assists",
            TargetColumn::Points => "points",
            TargetColumn::PlusMinus => "plus_minus",
            TargetColumn::GoalieGamesPlayed => "goalie_games_played",
            TargetColumn::GoalieWins => "goalie_wins",
            TargetColumn::GoalieLosses => "goalie_losses",
            TargetColumn::GoalieTiesOvertime => "goalie_ties_overtime",
            TargetColumn::SavePercentage => "save_percentage",
            TargetColumn::GoalsAgainstAverage => "goals_against_average",
        }
    }

    /// Position of this target in a prediction row
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Every column the loader requires, without duplicates
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![YEAR_COLUMN];
    columns.extend(NUMERIC_FEATURES);
    columns.extend(CATEGORICAL_FEATURES);
    for target in TargetColumn::ALL {
        if !columns.contains(&target.name()) {
            columns.push(target.name());
        }
    }
    columns
}

/// Read a column as `f64`, keeping nulls
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| ProjectorError::FeatureNotFound(name.to_string()))?;
    let series = column
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| ProjectorError::DataError(format!("column '{}': {}", name, e)))?;
    let values = series.f64()?;
    Ok(values.into_iter().collect())
}

/// Read a column as strings, keeping nulls
pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| ProjectorError::FeatureNotFound(name.to_string()))?;
    let series = column
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(|e| ProjectorError::DataError(format!("column '{}': {}", name, e)))?;
    let values = series.str()?;
    Ok(values
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
