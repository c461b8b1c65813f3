//! Model training module
//!
//! A bagged ensemble of multi-output regression trees, trained once on the
//! full draft history against every target column at the same time.

mod config;
mod engine;
pub mod decision_tree;
pub mod random_forest;

pub use config::TrainingConfig;
pub use decision_tree::{DecisionTree, TreeNode};
pub use engine::{ProjectionModel, TrainingSummary};
pub use random_forest::{MaxFeatures, RandomForest};
