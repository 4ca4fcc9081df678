//! Ordinal encoding for categorical features.
//!
//! Maps categorical values to integer ordinals (0, 1, 2, ...).

use crate::frame::column_values;
use crate::preprocessing::encoding::{sorted_categories, Category};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{check_n_features, FittedTransformer, Transformer};
use ndarray::Array2;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Ordinal encoder for categorical features.
///
/// Maps each unique category to an integer ordinal (0, 1, 2, ...).
/// The mapping is learned from the training data, with categories
/// sorted in ascending order. Missing cells are rejected both during fit
/// and during transform, and so is any category not seen during fit.
///
/// # Example
/// ```rust
/// use polars::prelude::*;
/// use prefer_train::preprocessing::{FittedTransformer, OrdinalEncoder, Transformer};
///
/// let data = df!("zone" => ["Z", "Y", "Z"]).unwrap();
/// let fitted = OrdinalEncoder::new().fit(&data).unwrap();
///
/// // "Y" -> 0, "Z" -> 1
/// let encoded = fitted.transform(&data).unwrap();
/// assert_eq!(encoded.column(0).to_vec(), vec![1.0, 0.0, 1.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OrdinalEncoder;

impl OrdinalEncoder {
    /// Create a new OrdinalEncoder.
    pub fn new() -> Self {
        Self
    }
}

/// Serializable parameters for a fitted OrdinalEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrdinalEncoderParams {
    /// Names of the input columns seen during fit.
    pub feature_names: Vec<String>,
    /// Sorted categories for each input column. The ordinal is the index.
    pub categories: Vec<Vec<Category>>,
}

/// Fitted OrdinalEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOrdinalEncoder {
    feature_names: Vec<String>,
    categories: Vec<Vec<Category>>,
}

impl FittedOrdinalEncoder {
    /// Get the categories learned for each feature.
    pub fn categories(&self) -> &[Vec<Category>] {
        &self.categories
    }

    /// Ordinal of `category` in feature `feature_idx`, if it was seen during fit.
    pub fn ordinal(&self, feature_idx: usize, category: &Category) -> Option<usize> {
        self.categories
            .get(feature_idx)?
            .binary_search(category)
            .ok()
    }
}

fn missing_value_error(column: &str, row: usize) -> PreprocessingError {
    PreprocessingError::MissingValues(format!(
        "OrdinalEncoder found a missing value in column '{}' at row {}",
        column, row
    ))
}

impl Transformer for OrdinalEncoder {
    type Params = OrdinalEncoderParams;
    type Fitted = FittedOrdinalEncoder;

    fn fit(&self, data: &DataFrame) -> Result<Self::Fitted, PreprocessingError> {
        if data.height() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OrdinalEncoder on empty data".to_string(),
            ));
        }

        let mut feature_names = Vec::with_capacity(data.width());
        let mut categories = Vec::with_capacity(data.width());
        for column in data.get_columns() {
            let name = column.name().as_str();
            if let Some(row) = column_values(column)?.iter().position(|v| v.is_null()) {
                return Err(missing_value_error(name, row));
            }
            feature_names.push(name.to_string());
            categories.push(sorted_categories(column)?);
        }

        Ok(FittedOrdinalEncoder {
            feature_names,
            categories,
        })
    }
}

impl FittedTransformer for FittedOrdinalEncoder {
    type Params = OrdinalEncoderParams;

    fn transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
        check_n_features(data, self.feature_names.len())?;

        let mut result = Array2::<f64>::zeros((data.height(), data.width()));

        for (col, column) in data.get_columns().iter().enumerate() {
            let name = column.name().as_str();
            for (row, value) in column_values(column)?.into_iter().enumerate() {
                let category = Category::from_value(value);
                if category.is_missing() {
                    return Err(missing_value_error(name, row));
                }
                let ordinal = self.ordinal(col, &category).ok_or_else(|| {
                    PreprocessingError::UnknownCategory {
                        column: name.to_string(),
                        value: category.to_string(),
                    }
                })?;
                result[[row, col]] = ordinal as f64;
            }
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        OrdinalEncoderParams {
            feature_names: self.feature_names.clone(),
            categories: self.categories.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.feature_names.len() != params.categories.len() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "OrdinalEncoder has {} feature names but {} category lists",
                params.feature_names.len(),
                params.categories.len()
            )));
        }
        Ok(FittedOrdinalEncoder {
            feature_names: params.feature_names,
            categories: params.categories,
        })
    }

    fn n_features_in(&self) -> usize {
        self.feature_names.len()
    }

    fn n_features_out(&self) -> usize {
        self.feature_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_ordinal_encoder_basic() {
        let data = df!(
            "cf20m128" => ["B", "A", "C"],
            "nomem_encr" => [30i64, 10, 20],
        )
        .unwrap();

        let fitted = OrdinalEncoder::new().fit(&data).unwrap();
        let encoded = fitted.transform(&data).unwrap();

        assert_eq!(encoded.column(0).to_vec(), vec![1.0, 0.0, 2.0]);
        assert_eq!(encoded.column(1).to_vec(), vec![2.0, 0.0, 1.0]);
        assert_eq!(fitted.n_features_out(), 2);
    }

    #[test]
    fn test_ordinal_encoder_unknown_error() {
        let train = df!("zone" => ["Z", "Y"]).unwrap();
        let fitted = OrdinalEncoder::new().fit(&train).unwrap();

        let new = df!("zone" => ["X"]).unwrap();
        assert!(matches!(
            fitted.transform(&new),
            Err(PreprocessingError::UnknownCategory { column, value })
                if column == "zone" && value == "X"
        ));
    }

    #[test]
    fn test_ordinal_encoder_unknown_never_encoded() {
        let train = df!("zone" => ["Z", "Y"]).unwrap();
        let fitted = OrdinalEncoder::new().fit(&train).unwrap();
        let restored = FittedOrdinalEncoder::from_params(fitted.extract_params()).unwrap();

        let new = df!("zone" => ["Y", "X"]).unwrap();
        assert!(matches!(
            restored.transform(&new),
            Err(PreprocessingError::UnknownCategory { .. })
        ));
        assert_eq!(restored.ordinal(0, &Category::Text("X".to_string())), None);
    }

    #[test]
    fn test_ordinal_encoder_missing_rejected_at_fit() {
        let data = df!("zone" => [Some("Z"), None]).unwrap();

        let result = OrdinalEncoder::new().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::MissingValues(_))));
    }

    #[test]
    fn test_ordinal_encoder_missing_rejected_at_transform() {
        let train = df!("zone" => ["Z"]).unwrap();
        let fitted = OrdinalEncoder::new().fit(&train).unwrap();

        let new = df!("zone" => [None::<&str>]).unwrap();
        assert!(matches!(
            fitted.transform(&new),
            Err(PreprocessingError::MissingValues(_))
        ));
    }

    #[test]
    fn test_ordinal_encoder_params_round_trip() {
        let data = df!("zone" => ["Z", "Y"]).unwrap();
        let fitted = OrdinalEncoder::new().fit(&data).unwrap();

        let restored = FittedOrdinalEncoder::from_params(fitted.extract_params()).unwrap();
        assert_eq!(restored.extract_params(), fitted.extract_params());
        assert_eq!(restored.ordinal(0, &Category::Text("Z".to_string())), Some(1));
    }

    #[test]
    fn test_ordinal_encoder_from_params_rejects_inconsistent_lists() {
        let params = OrdinalEncoderParams {
            feature_names: vec!["a".to_string(), "b".to_string()],
            categories: vec![vec![Category::Int(1)]],
        };
        assert!(FittedOrdinalEncoder::from_params(params).is_err());
    }
}
