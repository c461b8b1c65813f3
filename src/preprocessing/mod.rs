//! Feature preprocessing
//!
//! Turns the raw draft columns into the numeric matrix the forest trains on:
//! - Numeric passthrough (`overall_pick`, `age`)
//! - One-hot encoding (`position`, `nationality`) with a vocabulary fixed at fit time

mod config;
mod encoder;
mod pipeline;

pub use config::PreprocessingConfig;
pub use encoder::{OneHotEncoder, MISSING_CATEGORY};
pub use pipeline::FeaturePreprocessor;
