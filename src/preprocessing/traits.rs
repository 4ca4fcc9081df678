//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; has hyperparameters and can learn from data.
//! - [`FittedTransformer`]: After fitting; ready for inference and serialization.
//!
//! Transformers read named, typed columns from a [`DataFrame`] and produce a dense
//! `f64` feature matrix with one row per input row.

use crate::preprocessing::error::PreprocessingError;
use crate::serialization::SerializableParams;
use ndarray::Array2;
use polars::prelude::DataFrame;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters. This trait represents the
/// configurable, unfitted state.
///
/// Every column of the input frame is treated as a feature, in frame order.
/// Use [`ColumnTransformer`](crate::preprocessing::ColumnTransformer) to route
/// named subsets of a wider table to different transformers.
///
/// # Example
/// ```rust
/// use polars::prelude::*;
/// use prefer_train::preprocessing::{FittedTransformer, StandardScaler, Transformer};
///
/// let data = df!("age" => [30.0, 40.0]).unwrap();
/// let fitted = StandardScaler::new().fit(&data).unwrap();
/// let scaled = fitted.transform(&data).unwrap();
/// assert_eq!(scaled[[0, 0]], -1.0);
/// ```
pub trait Transformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Params = Self::Params>;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - Data is empty
    /// - Data contains values the transformer cannot use (missing, non-numeric)
    fn fit(&self, data: &DataFrame) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// After fitting, a transformer contains learned parameters (e.g. the mean and
/// std for StandardScaler, the category lists for OneHotEncoder) and can
/// transform new data. It can also be serialized and deserialized.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
/// - `save_to_file` / `load_from_file` are cross-platform compatible.
pub trait FittedTransformer: Clone {
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - The number of input columns doesn't match what was seen during fit
    /// - Input contains values the transformer cannot use
    fn transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Returns the number of input columns seen during fit.
    fn n_features_in(&self) -> usize;

    /// Returns the number of output features produced by [`transform`](Self::transform).
    fn n_features_out(&self) -> usize;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), PreprocessingError> {
        let bytes = self
            .extract_params()
            .to_bytes()
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }
}

/// Checks that `data` has the column count a fitted transformer expects.
pub(crate) fn check_n_features(data: &DataFrame, expected: usize) -> Result<(), PreprocessingError> {
    if data.width() != expected {
        return Err(PreprocessingError::FeatureMismatch {
            expected_features: expected,
            got_features: data.width(),
        });
    }
    Ok(())
}
