//! Training configuration.

use crate::dataset::FeatureSchema;
use crate::model::LogisticRegression;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default artifact path, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "model.bin";

/// Default seed. Recorded in the artifact; fitting is deterministic and ignores it.
pub const DEFAULT_SEED: u64 = 1;

/// What the classifier is fitted on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureInput {
    /// The selected columns as they are. Numeric columns pass through,
    /// string-typed categorical and identifier columns are ordinal-coded,
    /// and the one-hot/scaling transform is built but not applied.
    #[default]
    Raw,
    /// The output of the one-hot/scaling transform. The identifier column is
    /// not part of the transform and is dropped.
    Preprocessed,
}

/// Settings for one call to [`train_and_save_model`](crate::training::train_and_save_model).
///
/// Once built via [`TrainingConfigBuilder`], it is immutable.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingConfig {
    pub(crate) output_path: PathBuf,
    pub(crate) seed: u64,
    pub(crate) feature_input: FeatureInput,
    pub(crate) schema: FeatureSchema,
    pub(crate) classifier: LogisticRegression,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfigBuilder::new().build()
    }
}

impl TrainingConfig {
    /// Equivalent to `TrainingConfigBuilder::new()`.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::new()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn feature_input(&self) -> FeatureInput {
        self.feature_input
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }
}

/// Fluent builder for [`TrainingConfig`].
///
/// Defaults:
/// - `output_path`: `model.bin`
/// - `seed`: 1
/// - `feature_input`: [`FeatureInput::Raw`]
/// - `schema`: [`FeatureSchema::default`]
/// - `classifier`: [`LogisticRegression::default`]
#[derive(Clone, Debug)]
pub struct TrainingConfigBuilder {
    output_path: PathBuf,
    seed: u64,
    feature_input: FeatureInput,
    schema: FeatureSchema,
    classifier: LogisticRegression,
}

impl Default for TrainingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingConfigBuilder {
    pub fn new() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_MODEL_PATH),
            seed: DEFAULT_SEED,
            feature_input: FeatureInput::default(),
            schema: FeatureSchema::default(),
            classifier: LogisticRegression::default(),
        }
    }

    /// Where the artifact is written. An existing file is replaced.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn feature_input(mut self, feature_input: FeatureInput) -> Self {
        self.feature_input = feature_input;
        self
    }

    pub fn schema(mut self, schema: FeatureSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn classifier(mut self, classifier: LogisticRegression) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn build(self) -> TrainingConfig {
        TrainingConfig {
            output_path: self.output_path,
            seed: self.seed,
            feature_input: self.feature_input,
            schema: self.schema,
            classifier: self.classifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrainingConfig::default();
        assert_eq!(config.output_path(), Path::new("model.bin"));
        assert_eq!(config.seed(), 1);
        assert_eq!(config.feature_input(), FeatureInput::Raw);
        assert_eq!(config.schema(), &FeatureSchema::default());
        assert_eq!(config.classifier(), &LogisticRegression::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = TrainingConfig::builder()
            .output_path("/tmp/out.bin")
            .seed(7)
            .feature_input(FeatureInput::Preprocessed)
            .classifier(LogisticRegression::new().alpha(0.5))
            .build();

        assert_eq!(config.output_path(), Path::new("/tmp/out.bin"));
        assert_eq!(config.seed(), 7);
        assert_eq!(config.feature_input(), FeatureInput::Preprocessed);
        assert_eq!(config.classifier(), &LogisticRegression::new().alpha(0.5));
    }

    #[test]
    fn test_builder_is_reusable_via_clone() {
        let builder = TrainingConfig::builder().seed(3);
        let a = builder.clone().output_path("a.bin").build();
        let b = builder.output_path("b.bin").build();
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.output_path(), b.output_path());
    }
}
