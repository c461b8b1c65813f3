//! Error types for the draft projector

use thiserror::Error;

/// Result type alias for projector operations
pub type Result<T> = std::result::Result<T, ProjectorError>;

/// Main error type for loading, fitting, and projecting
#[derive(Error, Debug)]
pub enum ProjectorError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Found unknown category '{value}' in column '{column}' during transform")]
    UnknownCategory { column: String, value: String },

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<polars::error::PolarsError> for ProjectorError {
    fn from(err: polars::error::PolarsError) -> Self {
        ProjectorError::DataError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ProjectorError {
    fn from(err: ndarray::ShapeError) -> Self {
        ProjectorError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProjectorError::DataError("test error".to_string());
        assert_eq!(err.to_string(), "Data error: test error");
    }

    #[test]
    fn test_unknown_category_display() {
        let err = ProjectorError::UnknownCategory {
            column: "position".to_string(),
            value: "RUS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Found unknown category 'RUS' in column 'position' during transform"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ProjectorError = io_err.into();
        assert!(matches!(err, ProjectorError::IoError(_)));
    }
}
