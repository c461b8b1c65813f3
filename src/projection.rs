//! Player queries and projected career statistics

use crate::data::TargetColumn;
use crate::error::{ProjectorError, Result};
use ndarray::ArrayView1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// The only position code projected with goalie statistics
pub const GOALIE_POSITION: &str = "G";

/// The four inputs a projection is made from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerQuery {
    pub overall_pick: i64,
    pub age: f64,
    pub position: String,
    pub nationality: String,
}

impl PlayerQuery {
    pub fn new(
        overall_pick: i64,
        age: f64,
        position: impl Into<String>,
        nationality: impl Into<String>,
    ) -> Self {
        Self {
            overall_pick,
            age,
            position: position.into(),
            nationality: nationality.into(),
        }
    }

    /// Single-row frame with the feature columns
    pub fn to_frame(&self) -> Result<DataFrame> {
        Ok(df!(
            "overall_pick" => &[self.overall_pick],
            "position" => &[self.position.as_str()],
            "nationality" => &[self.nationality.as_str()],
            "age" => &[self.age],
        )?)
    }
}

/// Projected skater career totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SkaterLine {
    pub games_played: f64,
    pub goals: f64,
    pub assists: f64,
    pub points: f64,
    pub plus_minus: f64,
}

/// Projected goalie career totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalieLine {
    pub games_played: f64,
    pub wins: f64,
    pub losses: f64,
    pub ties_overtime: f64,
    pub save_percentage: f64,
    pub goals_against_average: f64,
}

/// Every projected target, by name
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Projection {
    pub year: f64,
    pub to_year: f64,
    pub skater: SkaterLine,
    pub goalie: GoalieLine,
}

/// The statistics shown for a player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatLine {
    Skater(SkaterLine),
    Goalie(GoalieLine),
}

impl Projection {
    /// Decode one prediction row laid out in [`TargetColumn`] order
    pub fn from_row(row: ArrayView1<f64>) -> Result<Self> {
        if row.len() != TargetColumn::COUNT {
            return Err(ProjectorError::ShapeError {
                expected: format!("{} targets", TargetColumn::COUNT),
                actual: format!("{} targets", row.len()),
            });
        }

        let get = |target: TargetColumn| row[target.index()];

        Ok(Self {
            year: get(TargetColumn::Year),
            to_year: get(TargetColumn::ToYear),
            skater: SkaterLine {
                games_played: get(TargetColumn::GamesPlayed),
                goals: get(TargetColumn::Goals),
                assists: get(TargetColumn::Assists),
                points: get(TargetColumn::Points),
                plus_minus: get(TargetColumn::PlusMinus),
            },
            goalie: GoalieLine {
                games_played: get(TargetColumn::GoalieGamesPlayed),
                wins: get(TargetColumn::GoalieWins),
                losses: get(TargetColumn::GoalieLosses),
                ties_overtime: get(TargetColumn::GoalieTiesOvertime),
                save_percentage: get(TargetColumn::SavePercentage),
                goals_against_average: get(TargetColumn::GoalsAgainstAverage),
            },
        })
    }

    /// Goalie statistics for `"G"`, skater statistics for any other position
    pub fn stat_line(&self, position: &str) -> StatLine {
        if position == GOALIE_POSITION {
            StatLine::Goalie(self.goalie)
        } else {
            StatLine::Skater(self.skater)
        }
    }
}
