//! Classification models.
//!
//! Fitting is delegated to [`linfa_logistic`]; this module wraps it behind a
//! small builder and turns the fitted estimator into plain, serializable
//! parameters:
//! - [`LogisticRegression`]: hyperparameters, used for fitting.
//! - [`FittedLogisticRegression`]: inference-only, serializable predictor.
//!
//! A fitted model carries no training hyperparameters.

pub mod logistic;

pub use logistic::{FittedLogisticRegression, LogisticParams, LogisticRegression};

use crate::serialization::SerializableParams;
use thiserror::Error;

/// Error type for model fitting, scoring and persistence.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The external estimator rejected the data or failed to converge.
    #[error("Model fitting failed: {0}")]
    Fit(String),

    /// No samples were provided.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Input width differs from the number of fitted coefficients.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// Invalid hyperparameter value or inconsistent inputs.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A fitted model ready for prediction and serialization.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
/// - Prediction never depends on anything but the extracted parameters.
pub trait InferenceModel: Sized {
    type InputSingle;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;
    /// Plain-data representation of the fitted parameters.
    type ParamsRepr: SerializableParams;

    /// Predict on a single sample (feature vector).
    fn predict(&self, input: &Self::InputSingle) -> Result<Self::OutputSingle, ModelError>;

    /// Predict on a batch of samples, one per row.
    fn predict_batch(&self, input: &Self::InputBatch) -> Result<Self::OutputBatch, ModelError>;

    fn extract_params(&self) -> Self::ParamsRepr;

    fn from_params(params: Self::ParamsRepr) -> Result<Self, ModelError>;

    /// Save the fitted model to a file, replacing any existing file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ModelError> {
        let bytes = self
            .extract_params()
            .to_bytes()
            .map_err(|e| ModelError::SerializationError(e.to_string()))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a fitted model from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path)?;
        let params = Self::ParamsRepr::from_bytes(&bytes)
            .map_err(|e| ModelError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }
}
