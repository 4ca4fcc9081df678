//! Numeric passthrough.
//!
//! Copies numeric columns into the feature matrix without changing their values.

use crate::frame::{column_names, column_values, Value};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{check_n_features, FittedTransformer, Transformer};
use ndarray::Array2;
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};

/// Reads `column` as `f64` values.
///
/// Integer and float columns are converted directly; string columns must hold
/// numbers (surrounding whitespace is ignored). Missing cells are rejected.
pub(crate) fn numeric_values(column: &Column) -> Result<Vec<f64>, PreprocessingError> {
    let name = column.name().as_str();
    column_values(column)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Value::Int(v) => Ok(v as f64),
            Value::Float(v) if !v.is_nan() => Ok(v),
            Value::Str(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| PreprocessingError::NonNumeric {
                    column: name.to_string(),
                    row,
                    value: text.to_string(),
                }),
            Value::Null | Value::Float(_) => Err(PreprocessingError::MissingValues(format!(
                "column '{}' is missing a value at row {}",
                name, row
            ))),
        })
        .collect()
}

/// Reads every column of `data` as numbers into an `(n_rows, n_cols)` matrix.
pub(crate) fn numeric_matrix(data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
    let mut result = Array2::<f64>::zeros((data.height(), data.width()));
    for (col, column) in data.get_columns().iter().enumerate() {
        for (row, value) in numeric_values(column)?.into_iter().enumerate() {
            result[[row, col]] = value;
        }
    }
    Ok(result)
}

/// Passes numeric columns through unchanged.
///
/// Fitting only records the column names; transform converts every cell to
/// `f64` and fails on missing or non-numeric cells.
#[derive(Clone, Debug, Default)]
pub struct Passthrough;

impl Passthrough {
    pub fn new() -> Self {
        Self
    }
}

/// Serializable parameters for a fitted Passthrough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassthroughParams {
    /// Names of the input columns seen during fit.
    pub feature_names: Vec<String>,
}

/// Fitted Passthrough ready for inference.
#[derive(Clone, Debug)]
pub struct FittedPassthrough {
    feature_names: Vec<String>,
}

impl Transformer for Passthrough {
    type Params = PassthroughParams;
    type Fitted = FittedPassthrough;

    fn fit(&self, data: &DataFrame) -> Result<Self::Fitted, PreprocessingError> {
        if data.height() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit Passthrough on empty data".to_string(),
            ));
        }
        // Validate now so bad training data fails at fit time.
        numeric_matrix(data)?;

        Ok(FittedPassthrough {
            feature_names: column_names(data),
        })
    }
}

impl FittedTransformer for FittedPassthrough {
    type Params = PassthroughParams;

    fn transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
        check_n_features(data, self.feature_names.len())?;
        numeric_matrix(data)
    }

    fn extract_params(&self) -> Self::Params {
        PassthroughParams {
            feature_names: self.feature_names.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Ok(FittedPassthrough {
            feature_names: params.feature_names,
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
    fn test_passthrough_mixed_numeric_types() {
        let data = df!(
            "age" => [30i64, 40],
            "nettohh_f_2020" => [1000.5, 2000.0],
            "code" => [" 7 ", "8.5"],
        )
        .unwrap();

        let out = Passthrough::new().fit_transform(&data).unwrap();

        assert_eq!(out.shape(), &[2, 3]);
        assert_eq!(out.row(0).to_vec(), vec![30.0, 1000.5, 7.0]);
        assert_eq!(out.row(1).to_vec(), vec![40.0, 2000.0, 8.5]);
    }

    #[test]
    fn test_passthrough_non_numeric_string() {
        let data = df!("cf20m128" => ["1", "A"]).unwrap();

        let result = Passthrough::new().fit(&data);
        assert!(matches!(
            result,
            Err(PreprocessingError::NonNumeric { row: 1, value, .. }) if value == "A"
        ));
    }

    #[test]
    fn test_passthrough_missing_value() {
        let data = df!("age" => [Some(1.0), None]).unwrap();

        let result = Passthrough::new().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::MissingValues(_))));
    }

    #[test]
    fn test_passthrough_nan_is_missing() {
        let data = df!("age" => [f64::NAN]).unwrap();

        let result = Passthrough::new().fit(&data);
        assert!(matches!(result, Err(PreprocessingError::MissingValues(_))));
    }

    #[test]
    fn test_passthrough_feature_mismatch() {
        let train = df!("a" => [1i64], "b" => [2i64]).unwrap();
        let fitted = Passthrough::new().fit(&train).unwrap();

        let narrow = train.select(["a"]).unwrap();
        assert!(matches!(
            fitted.transform(&narrow),
            Err(PreprocessingError::FeatureMismatch { .. })
        ));
    }
}
