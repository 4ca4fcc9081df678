//! One-hot encoding for categorical features.
//!
//! Transforms each categorical column into indicator columns.

use crate::frame::column_values;
use crate::preprocessing::encoding::{sorted_categories, Category, HandleUnknown};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{check_n_features, FittedTransformer, Transformer};
use ndarray::Array2;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// One-hot encoder for categorical features.
///
/// Each input column is treated as a categorical feature, and the encoder
/// learns the sorted unique values (categories) present in each column during
/// fitting. A missing cell is a category of its own.
///
/// # Example
/// ```rust
/// use polars::prelude::*;
/// use prefer_train::preprocessing::{FittedTransformer, HandleUnknown, OneHotEncoder, Transformer};
///
/// let train = df!("zone" => ["Z", "Y"]).unwrap();
/// let fitted = OneHotEncoder::new()
///     .with_handle_unknown(HandleUnknown::Ignore)
///     .fit(&train)
///     .unwrap();
///
/// // Categories are sorted: ["Y", "Z"]
/// let encoded = fitted.transform(&train).unwrap();
/// assert_eq!(encoded.row(0).to_vec(), vec![0.0, 1.0]);
///
/// // Unknown categories encode to all zeros
/// let new = df!("zone" => ["X"]).unwrap();
/// assert_eq!(fitted.transform(&new).unwrap().row(0).to_vec(), vec![0.0, 0.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

/// Serializable parameters for a fitted OneHotEncoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Names of the input columns seen during fit.
    pub feature_names: Vec<String>,
    /// Sorted categories for each input column.
    pub categories: Vec<Vec<Category>>,
    /// Handle unknown strategy.
    pub handle_unknown: HandleUnknown,
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    feature_names: Vec<String>,
    categories: Vec<Vec<Category>>,
    /// Output column offset of each input column's block.
    offsets: Vec<usize>,
    n_features_out: usize,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Get the categories learned for each feature.
    pub fn categories(&self) -> &[Vec<Category>] {
        &self.categories
    }

    /// Names of the generated indicator columns, `<column>_<category>`.
    pub fn feature_names_out(&self) -> Vec<String> {
        self.feature_names
            .iter()
            .zip(&self.categories)
            .flat_map(|(name, cats)| cats.iter().map(move |cat| format!("{}_{}", name, cat)))
            .collect()
    }

    fn build(
        feature_names: Vec<String>,
        categories: Vec<Vec<Category>>,
        handle_unknown: HandleUnknown,
    ) -> Self {
        let mut offsets = Vec::with_capacity(categories.len());
        let mut n_features_out = 0;
        for cats in &categories {
            offsets.push(n_features_out);
            n_features_out += cats.len();
        }
        Self {
            feature_names,
            categories,
            offsets,
            n_features_out,
            handle_unknown,
        }
    }
}

impl Transformer for OneHotEncoder {
    type Params = OneHotEncoderParams;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &DataFrame) -> Result<Self::Fitted, PreprocessingError> {
        if data.height() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let mut feature_names = Vec::with_capacity(data.width());
        let mut categories = Vec::with_capacity(data.width());
        for column in data.get_columns() {
            feature_names.push(column.name().to_string());
            categories.push(sorted_categories(column)?);
        }

        Ok(FittedOneHotEncoder::build(
            feature_names,
            categories,
            self.handle_unknown,
        ))
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Params = OneHotEncoderParams;

    fn transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
        check_n_features(data, self.feature_names.len())?;

        let mut result = Array2::<f64>::zeros((data.height(), self.n_features_out));

        for (col, column) in data.get_columns().iter().enumerate() {
            let cats = &self.categories[col];
            for (row, value) in column_values(column)?.into_iter().enumerate() {
                let category = Category::from_value(value);
                match cats.binary_search(&category) {
                    Ok(idx) => result[[row, self.offsets[col] + idx]] = 1.0,
                    Err(_) if self.handle_unknown == HandleUnknown::Ignore => {}
                    Err(_) => {
                        return Err(PreprocessingError::UnknownCategory {
                            column: column.name().to_string(),
                            value: category.to_string(),
                        })
                    }
                }
            }
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            feature_names: self.feature_names.clone(),
            categories: self.categories.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.feature_names.len() != params.categories.len() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "OneHotEncoder has {} feature names but {} category lists",
                params.feature_names.len(),
                params.categories.len()
            )));
        }
        Ok(FittedOneHotEncoder::build(
            params.feature_names,
            params.categories,
            params.handle_unknown,
        ))
    }

    fn n_features_in(&self) -> usize {
        self.feature_names.len()
    }

    fn n_features_out(&self) -> usize {
        self.n_features_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn survey() -> DataFrame {
        df!(
            "cf20m128" => ["A", "B", "A"],
            "oplzon_2020" => [3i64, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_one_hot_encoder_multiple_columns() {
        let fitted = OneHotEncoder::new().fit(&survey()).unwrap();

        assert_eq!(fitted.n_features_in(), 2);
        assert_eq!(fitted.n_features_out(), 5);
        assert_eq!(
            fitted.feature_names_out(),
            vec![
                "cf20m128_A",
                "cf20m128_B",
                "oplzon_2020_1",
                "oplzon_2020_2",
                "oplzon_2020_3"
            ]
        );

        let encoded = fitted.transform(&survey()).unwrap();
        assert_eq!(encoded.row(0).to_vec(), vec![1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(encoded.row(1).to_vec(), vec![0.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(encoded.row(2).to_vec(), vec![1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_one_hot_encoder_rows_sum_to_column_count() {
        let fitted = OneHotEncoder::new().fit(&survey()).unwrap();
        let encoded = fitted.transform(&survey()).unwrap();
        for row in encoded.rows() {
            assert_eq!(row.sum(), 2.0);
        }
    }

    #[test]
    fn test_one_hot_encoder_unknown_error() {
        let fitted = OneHotEncoder::new().fit(&survey()).unwrap();
        let new = df!("cf20m128" => ["C"], "oplzon_2020" => [1i64]).unwrap();

        let result = fitted.transform(&new);
        assert!(matches!(
            result,
            Err(PreprocessingError::UnknownCategory { column, value })
                if column == "cf20m128" && value == "C"
        ));
    }

    #[test]
    fn test_one_hot_encoder_unknown_ignore() {
        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Ignore)
            .fit(&survey())
            .unwrap();
        let new = df!("cf20m128" => ["C"], "oplzon_2020" => [9i64]).unwrap();

        let encoded = fitted.transform(&new).unwrap();
        assert_eq!(encoded.row(0).sum(), 0.0);
    }

    #[test]
    fn test_one_hot_encoder_missing_is_a_category() {
        let data = df!("cf20m128" => [Some("A"), None]).unwrap();
        let fitted = OneHotEncoder::new().fit(&data).unwrap();

        assert_eq!(
            fitted.categories()[0],
            vec![Category::Missing, Category::Text("A".to_string())]
        );
        let encoded = fitted.transform(&data).unwrap();
        assert_eq!(encoded.row(1).to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_one_hot_encoder_integral_floats_match_ints() {
        let train = df!("code" => [1i64, 2]).unwrap();
        let fitted = OneHotEncoder::new().fit(&train).unwrap();

        let scored = df!("code" => [2.0]).unwrap();
        let encoded = fitted.transform(&scored).unwrap();
        assert_eq!(encoded.row(0).to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_one_hot_encoder_empty_data() {
        let data = df!("code" => Vec::<i64>::new()).unwrap();
        let result = OneHotEncoder::new().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_one_hot_encoder_feature_mismatch() {
        let fitted = OneHotEncoder::new().fit(&survey()).unwrap();
        let narrow = survey().select(["cf20m128"]).unwrap();

        let result = fitted.transform(&narrow);
        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 1
            })
        ));
    }

    #[test]
    fn test_one_hot_encoder_params_round_trip() {
        let fitted = OneHotEncoder::new()
            .with_handle_unknown(HandleUnknown::Ignore)
            .fit(&survey())
            .unwrap();

        let restored = FittedOneHotEncoder::from_params(fitted.extract_params()).unwrap();

        assert_eq!(restored.extract_params(), fitted.extract_params());
        assert_eq!(
            restored.transform(&survey()).unwrap(),
            fitted.transform(&survey()).unwrap()
        );
    }

    #[test]
    fn test_one_hot_encoder_save_load() {
        let fitted = OneHotEncoder::new().fit(&survey()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one_hot.bin");

        fitted.save_to_file(&path).unwrap();
        let loaded = FittedOneHotEncoder::load_from_file(&path).unwrap();

        assert_eq!(loaded.n_features_out(), 5);
        assert_eq!(
            loaded.transform(&survey()).unwrap(),
            fitted.transform(&survey()).unwrap()
        );
    }
}
