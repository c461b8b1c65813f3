//! Draft Projector - career projections for NHL draft picks
//!
//! Trains a multi-output random forest on historical draft results and
//! projects a new pick's career statistics from four inputs: overall pick,
//! age, position, and nationality.
//!
//! # Modules
//!
//! - [`data`] - Draft CSV schema, loading, and year filtering
//! - [`preprocessing`] - Numeric passthrough and one-hot encoding
//! - [`training`] - Regression trees, random forest, and the projection model
//! - [`projection`] - Player queries and labelled projections
//! - [`reference`] - Position and nationality lookup tables
//! - [`cli`] - Command-line interface and interactive session

pub mod error;

pub mod data;
pub mod preprocessing;
pub mod training;
pub mod projection;
pub mod reference;

pub mod cli;

pub use error::{ProjectorError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ProjectorError, Result};

    pub use crate::data::{DraftDataLoader, TargetColumn};
    pub use crate::preprocessing::{FeaturePreprocessor, OneHotEncoder, PreprocessingConfig};
    pub use crate::training::{MaxFeatures, ProjectionModel, RandomForest, TrainingConfig};
    pub use crate::projection::{GoalieLine, PlayerQuery, Projection, SkaterLine, StatLine};
}
