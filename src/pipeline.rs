//! Predictive pipeline combining feature encoding and model inference.
//!
//! A [`PredictivePipeline`] is the persisted training artifact: the fitted
//! column transformer that turns a respondent table into a feature matrix, the
//! fitted logistic regression, and metadata describing how both were produced.
//! It is created once per training run, written to disk, and later loaded
//! read-only for scoring.

use crate::model::{FittedLogisticRegression, InferenceModel, LogisticParams, ModelError};
use crate::preprocessing::{
    ColumnTransformerParams, FittedColumnTransformer, FittedTransformer, PreprocessingError,
};
use crate::serialization::SerializableParams;
use crate::training::FeatureInput;
use ndarray::{Array1, Array2};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Version tag written into every artifact.
pub const FORMAT_VERSION: u32 = 1;

/// Error type for building, scoring, saving and loading a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Encoder output width differs from the classifier's coefficient count.
    #[error("Feature mismatch: encoder produces {encoder_features} features, model expects {model_features}")]
    FeatureMismatch {
        encoder_features: usize,
        model_features: usize,
    },

    /// The artifact was written by an incompatible format version.
    #[error("Unsupported artifact format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Provenance of a trained artifact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Columns selected from the training table, in selection order.
    pub feature_columns: Vec<String>,
    /// How the selected columns were turned into classifier inputs.
    pub feature_input: FeatureInput,
    /// Seed configured for the run. Fitting is deterministic and does not read it.
    pub seed: u64,
    /// Rows the classifier was fitted on.
    pub training_rows: usize,
}

/// Serializable parameters for the predictive pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictivePipelineParams {
    pub format_version: u32,
    pub metadata: ArtifactMetadata,
    pub preprocessor: ColumnTransformerParams,
    pub model: LogisticParams,
}

/// Fitted feature encoder plus fitted classifier.
#[derive(Clone, Debug)]
pub struct PredictivePipeline {
    preprocessor: FittedColumnTransformer,
    model: FittedLogisticRegression,
    metadata: ArtifactMetadata,
}

impl PredictivePipeline {
    /// Create a new predictive pipeline.
    ///
    /// # Errors
    /// [`PipelineError::FeatureMismatch`] if the encoder output width differs
    /// from the number of model coefficients.
    pub fn new(
        preprocessor: FittedColumnTransformer,
        model: FittedLogisticRegression,
        metadata: ArtifactMetadata,
    ) -> Result<Self, PipelineError> {
        if preprocessor.n_features_out() != model.n_features() {
            return Err(PipelineError::FeatureMismatch {
                encoder_features: preprocessor.n_features_out(),
                model_features: model.n_features(),
            });
        }
        Ok(Self {
            preprocessor,
            model,
            metadata,
        })
    }

    pub fn metadata(&self) -> &ArtifactMetadata {
        &self.metadata
    }

    pub fn preprocessor(&self) -> &FittedColumnTransformer {
        &self.preprocessor
    }

    pub fn model(&self) -> &FittedLogisticRegression {
        &self.model
    }

    /// Encode a respondent table into classifier inputs.
    pub fn preprocess(&self, data: &DataFrame) -> Result<Array2<f64>, PipelineError> {
        Ok(self.preprocessor.transform(data)?)
    }

    /// Probability of the positive outcome for every row of `data`.
    pub fn predict_proba(&self, data: &DataFrame) -> Result<Array1<f64>, PipelineError> {
        let features = self.preprocess(data)?;
        Ok(self.model.predict_batch(&features)?)
    }

    /// Predicted outcome for every row of `data` (probability threshold 0.5).
    pub fn predict(&self, data: &DataFrame) -> Result<Array1<bool>, PipelineError> {
        let features = self.preprocess(data)?;
        Ok(self.model.predict_labels(&features)?)
    }

    /// Extract parameters for serialization.
    pub fn extract_params(&self) -> PredictivePipelineParams {
        PredictivePipelineParams {
            format_version: FORMAT_VERSION,
            metadata: self.metadata.clone(),
            preprocessor: self.preprocessor.extract_params(),
            model: self.model.extract_params(),
        }
    }

    /// Reconstruct from parameters.
    pub fn from_params(params: PredictivePipelineParams) -> Result<Self, PipelineError> {
        if params.format_version != FORMAT_VERSION {
            return Err(PipelineError::UnsupportedVersion {
                found: params.format_version,
                expected: FORMAT_VERSION,
            });
        }
        let preprocessor = FittedColumnTransformer::from_params(params.preprocessor)?;
        let model = FittedLogisticRegression::from_params(params.model)?;
        Self::new(preprocessor, model, params.metadata)
    }

    /// Serialize the pipeline with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PipelineError> {
        self.extract_params()
            .to_bytes()
            .map_err(|e| PipelineError::SerializationError(e.to_string()))
    }

    /// Save the entire pipeline to a file, replacing any existing file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PipelineError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Load a pipeline from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let bytes = std::fs::read(path)?;
        let params = PredictivePipelineParams::from_bytes(&bytes)
            .map_err(|e| PipelineError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }
}
