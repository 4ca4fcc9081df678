//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the population
//! standard deviation (ddof = 0). Constant features get `s = 1`.

use crate::frame::column_names;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::passthrough::numeric_matrix;
use crate::preprocessing::traits::{check_n_features, FittedTransformer, Transformer};
use ndarray::{Array1, Array2, Axis};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Configuration for StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If true, center the data before scaling.
    pub with_mean: bool,
    /// If true, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// Serializable parameters for a fitted StandardScaler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Configuration options.
    pub config: StandardScalerConfig,
    /// Names of the input columns seen during fit.
    pub feature_names: Vec<String>,
    /// Mean of each feature (zeros if with_mean=false).
    pub mean: Vec<f64>,
    /// Standard deviation of each feature (ones if with_std=false).
    pub std: Vec<f64>,
}

/// StandardScaler transformer (unfitted).
///
/// Input columns must be numeric; missing values are rejected.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    config: StandardScalerConfig,
}

impl StandardScaler {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }
}

impl Transformer for StandardScaler {
    type Params = StandardScalerParams;
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &DataFrame) -> Result<Self::Fitted, PreprocessingError> {
        if data.height() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let values = numeric_matrix(data)?;
        let cols = values.ncols();

        let mean = if self.config.with_mean {
            values
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array1::zeros(cols))
        } else {
            Array1::zeros(cols)
        };

        let std = if self.config.with_std {
            // Handle zero std (constant features)
            values
                .std_axis(Axis(0), 0.0)
                .mapv(|s| if s == 0.0 { 1.0 } else { s })
        } else {
            Array1::ones(cols)
        };

        Ok(FittedStandardScaler {
            config: self.config.clone(),
            feature_names: column_names(data),
            mean,
            std,
        })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler {
    config: StandardScalerConfig,
    feature_names: Vec<String>,
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl FittedStandardScaler {
    /// Get the mean values for each feature.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Get the standard deviation values for each feature.
    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Params = StandardScalerParams;

    fn transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
        check_n_features(data, self.feature_names.len())?;

        let mut result = numeric_matrix(data)?;

        if self.config.with_mean {
            result -= &self.mean;
        }

        if self.config.with_std {
            result /= &self.std;
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        StandardScalerParams {
            config: self.config.clone(),
            feature_names: self.feature_names.clone(),
            mean: self.mean.to_vec(),
            std: self.std.to_vec(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let n_features = params.feature_names.len();
        if params.mean.len() != n_features || params.std.len() != n_features {
            return Err(PreprocessingError::InvalidParameter(format!(
                "StandardScaler expects {} means and stds, got {} and {}",
                n_features,
                params.mean.len(),
                params.std.len()
            )));
        }

        Ok(Self {
            config: params.config,
            feature_names: params.feature_names,
            mean: Array1::from(params.mean),
            std: Array1::from(params.std),
        })
    }

    fn n_features_in(&self) -> usize {
        self.feature_names.len()
    }

    fn n_features_out(&self) -> usize {
        self.feature_names.len()
    }
}
