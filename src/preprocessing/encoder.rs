//! One-hot categorical encoding

use crate::data::string_column;
use crate::error::{ProjectorError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category name used for a missing cell, in feature names and errors
pub const MISSING_CATEGORY: &str = "nan";

/// Vocabulary of one encoded column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnVocabulary {
    name: String,
    /// Sorted categories seen at fit time
    values: Vec<String>,
    /// A missing cell was seen at fit time; it gets the last indicator column
    has_missing: bool,
}

impl ColumnVocabulary {
    fn width(&self) -> usize {
        self.values.len() + usize::from(self.has_missing)
    }
}

/// One-hot encoder with a vocabulary learned per column at fit time.
///
/// A missing cell is a category of its own, placed after the sorted values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    // In input column order
    columns: Vec<ColumnVocabulary>,
    is_fitted: bool,
}

impl OneHotEncoder {
    /// Create an unfitted encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the sorted category set of each column
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        let mut vocabularies = Vec::with_capacity(columns.len());

        for &name in columns {
            let mut seen = BTreeSet::new();
            let mut has_missing = false;
            for value in string_column(df, name)? {
                match value {
                    Some(value) => {
                        seen.insert(value);
                    }
                    None => has_missing = true,
                }
            }
            vocabularies.push(ColumnVocabulary {
                name: name.to_string(),
                values: seen.into_iter().collect(),
                has_missing,
            });
        }

        self.columns = vocabularies;
        self.is_fitted = true;
        Ok(self)
    }

    /// Encode the fitted columns into indicator columns
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ProjectorError::ModelNotFitted);
        }

        let mut encoded = Array2::zeros((df.height(), self.n_output_features()));
        let mut offset = 0;

        for vocabulary in &self.columns {
            for (row, value) in string_column(df, &vocabulary.name)?.into_iter().enumerate() {
                let idx = match value {
                    Some(value) => vocabulary.values.binary_search(&value).map_err(|_| {
                        ProjectorError::UnknownCategory {
                            column: vocabulary.name.clone(),
                            value,
                        }
                    })?,
                    None if vocabulary.has_missing => vocabulary.values.len(),
                    None => {
                        return Err(ProjectorError::UnknownCategory {
                            column: vocabulary.name.clone(),
                            value: MISSING_CATEGORY.to_string(),
                        })
                    }
                };
                encoded[[row, offset + idx]] = 1.0;
            }
            offset += vocabulary.width();
        }

        Ok(encoded)
    }

    /// Learned categories of a column, without the missing category
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|v| v.name == column)
            .map(|v| v.values.as_slice())
    }

    /// Total number of indicator columns produced
    pub fn n_output_features(&self) -> usize {
        self.columns.iter().map(ColumnVocabulary::width).sum()
    }

    /// Indicator column names, `<column>_<category>`
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|v| {
                let missing = v.has_missing.then_some(MISSING_CATEGORY);
                v.values
                    .iter()
                    .map(String::as_str)
                    .chain(missing)
                    .map(move |c| format!("{}_{}", v.name, c))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> DataFrame {
        df!(
            "position" => &["RW", "C", "G", "D", "C"],
            "nationality" => &["USA", "CAN", "CAN", "USA", "USA"],
        )
        .unwrap()
    }

    fn fitted() -> OneHotEncoder {
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&players(), &["position", "nationality"]).unwrap();
        encoder
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let encoder = fitted();

        assert_eq!(encoder.categories("position").unwrap(), &["C", "D", "G", "RW"]);
        assert_eq!(encoder.categories("nationality").unwrap(), &["CAN", "USA"]);
        assert_eq!(encoder.n_output_features(), 6);
    }

    #[test]
    fn test_onehot_rows() {
        let encoded = fitted().transform(&players()).unwrap();

        assert_eq!(encoded.dim(), (5, 6));
        // RW, USA
        assert_eq!(encoded.row(0).to_vec(), vec![0.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
        for row in encoded.rows() {
            assert_eq!(row.sum(), 2.0);
        }
    }

    #[test]
    fn test_unknown_category() {
        let query = df!("position" => &["CAN"], "nationality" => &["CAN"]).unwrap();
        let err = fitted().transform(&query).unwrap_err();
        assert!(matches!(
            err,
            ProjectorError::UnknownCategory { ref column, ref value }
                if column == "position" && value == "CAN"
        ));
    }

    #[test]
    fn test_missing_value_is_own_category() {
        let df = df!(
            "position" => &[Some("C"), None, Some("D")],
            "nationality" => &[Some("CAN"), Some("USA"), None],
        )
        .unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&df, &["position", "nationality"]).unwrap();

        assert_eq!(encoder.categories("position").unwrap(), &["C", "D"]);
        assert_eq!(
            encoder.feature_names(),
            vec![
                "position_C",
                "position_D",
                "position_nan",
                "nationality_CAN",
                "nationality_USA",
                "nationality_nan",
            ]
        );

        let encoded = encoder.transform(&df).unwrap();
        assert_eq!(encoded.row(1).to_vec(), vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(encoded.row(2).to_vec(), vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_value_unseen_at_fit() {
        let query = df!(
            "position" => &[None::<&str>],
            "nationality" => &[Some("CAN")],
        )
        .unwrap();

        let err = fitted().transform(&query).unwrap_err();
        assert!(matches!(
            err,
            ProjectorError::UnknownCategory { ref column, ref value }
                if column == "position" && value == MISSING_CATEGORY
        ));
    }

    #[test]
    fn test_transform_before_fit() {
        let encoder = OneHotEncoder::new();
        assert!(matches!(
            encoder.transform(&players()),
            Err(ProjectorError::ModelNotFitted)
        ));
    }

    #[test]
    fn test_feature_names() {
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&players(), &["nationality"]).unwrap();
        assert_eq!(encoder.feature_names(), vec!["nationality_CAN", "nationality_USA"]);
    }
}
