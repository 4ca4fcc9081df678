//! Training entry point.
//!
//! [`train_and_save_model`] runs one linear pass:
//!
//! 1. inner-join respondents with outcomes on the identifier column
//! 2. drop rows without a label, failing if none remain
//! 3. build the one-hot/scaling transform
//! 4. select the feature columns
//! 5. fit the logistic regression
//! 6. write the artifact to the configured path
//!
//! With [`FeatureInput::Raw`] (the default) step 5 fits on the selected columns
//! directly and the transform from step 3 is left unused; a warning is logged.
//! [`FeatureInput::Preprocessed`] fits on the transform's output instead.

pub mod config;

pub use config::{
    FeatureInput, TrainingConfig, TrainingConfigBuilder, DEFAULT_MODEL_PATH, DEFAULT_SEED,
};

use crate::dataset::{
    build_training_table, extract_labels, DatasetError, FeatureKind, FeatureSchema,
};
use crate::model::ModelError;
use crate::pipeline::{ArtifactMetadata, PipelineError, PredictivePipeline};
use crate::preprocessing::{
    ColumnTransformer, FittedTransformer, HandleUnknown, OneHotEncoder, OrdinalEncoder,
    PreprocessingError, StandardScaler, Transformer,
};
use log::{debug, info, warn};
use polars::prelude::{DataFrame, DataType, PolarsError};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for [`train_and_save_model`].
#[derive(Debug, Error)]
pub enum TrainingError {
    /// No row has both a respondent, an outcome and a present label.
    #[error("No training rows left after joining on '{id_column}' and dropping rows without '{label_column}'")]
    EmptyTrainingSet {
        id_column: String,
        label_column: String,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Preprocessing(#[from] PreprocessingError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Summary of a completed training run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Rows produced by the join.
    pub joined_rows: usize,
    /// Rows the classifier was fitted on.
    pub training_rows: usize,
    /// Joined rows removed because their label was missing.
    pub dropped_missing_label: usize,
    /// Width of the classifier input.
    pub n_features: usize,
    pub feature_input: FeatureInput,
    pub output_path: PathBuf,
    pub seed: u64,
}

/// The one-hot/scaling transform: one-hot encode the categorical columns
/// (unknown categories encode to zeros) and standardize the numeric columns.
///
/// Columns of other kinds, including the identifier, are dropped.
pub fn build_preprocessor(schema: &FeatureSchema) -> ColumnTransformer {
    let categorical = schema.columns_of(FeatureKind::Categorical);
    let numeric = schema.columns_of(FeatureKind::Numeric);

    let mut ct = ColumnTransformer::new();
    if !categorical.is_empty() {
        ct = ct.add_one_hot_encoder(
            OneHotEncoder::new().with_handle_unknown(HandleUnknown::Ignore),
            &categorical,
        );
    }
    if !numeric.is_empty() {
        ct = ct.add_standard_scaler(StandardScaler::new(), &numeric);
    }
    ct
}

/// Encoder that feeds the selected columns to the classifier as they are.
///
/// Keeps the schema's column order with one output per column. Integer and
/// float columns pass through. String columns declared numeric must parse as
/// numbers; other string columns are ordinal-coded, and values not seen during
/// fit are rejected at scoring time.
pub fn build_raw_encoder(
    data: &DataFrame,
    schema: &FeatureSchema,
) -> Result<ColumnTransformer, TrainingError> {
    let mut ct = ColumnTransformer::new();
    for feature in &schema.features {
        let column = [feature.name.as_str()];
        ct = match (data.column(&feature.name)?.dtype(), feature.kind) {
            (DataType::String, FeatureKind::Categorical | FeatureKind::Identifier) => {
                ct.add_ordinal_encoder(OrdinalEncoder::new(), &column)
            }
            _ => ct.add_passthrough(&column),
        };
    }
    Ok(ct)
}

/// Trains the new-child classifier and writes it to `config.output_path()`.
///
/// Any existing file at the output path is replaced. Identical inputs and
/// configuration produce byte-identical artifacts.
///
/// # Errors
/// - [`TrainingError::EmptyTrainingSet`] if no row survives the join and label
///   filter; nothing is written in that case
/// - missing columns, unusable feature or label values, and classifier or
///   I/O failures are passed through from the step that hit them
pub fn train_and_save_model(
    respondents: &DataFrame,
    outcomes: &DataFrame,
    config: &TrainingConfig,
) -> Result<TrainingReport, TrainingError> {
    let schema = config.schema();
    info!(
        "training {} model: respondents={} outcomes={} seed={}",
        schema.label_column,
        respondents.height(),
        outcomes.height(),
        config.seed()
    );

    let table = build_training_table(respondents, outcomes, schema)?;
    let training_rows = table.frame.height();
    info!(
        "training table: joined_rows={} training_rows={} dropped_missing_label={}",
        table.joined_rows,
        training_rows,
        table.dropped_missing_label()
    );
    if training_rows == 0 {
        return Err(TrainingError::EmptyTrainingSet {
            id_column: schema.id_column.clone(),
            label_column: schema.label_column.clone(),
        });
    }

    let preprocessor = build_preprocessor(schema);

    let feature_columns = schema.feature_names();
    let selected = table
        .frame
        .select(feature_columns.iter().map(String::as_str))?;
    debug!("selected feature columns: {feature_columns:?}");

    let encoder = match config.feature_input() {
        FeatureInput::Raw => {
            warn!(
                "fitting on raw feature columns; the {}-step one-hot/scaling transform is not applied",
                preprocessor.len()
            );
            build_raw_encoder(&selected, schema)?
        }
        FeatureInput::Preprocessed => preprocessor,
    };

    let fitted_encoder = encoder.fit(&selected)?;
    let x = fitted_encoder.transform(&selected)?;
    let y = extract_labels(&table.frame, schema)?;
    debug!(
        "classifier input: rows={} features={} steps={:?}",
        x.nrows(),
        x.ncols(),
        fitted_encoder.step_names()
    );

    let model = config.classifier().fit(&x, &y)?;
    debug!(
        "fitted logistic regression: intercept={} coefficients={:?}",
        model.intercept(),
        model.coefficients().to_vec()
    );

    let metadata = ArtifactMetadata {
        feature_columns,
        feature_input: config.feature_input(),
        seed: config.seed(),
        training_rows,
    };
    let pipeline = PredictivePipeline::new(fitted_encoder, model, metadata)?;
    pipeline.save_to_file(config.output_path())?;
    info!("saved model to {}", config.output_path().display());

    Ok(TrainingReport {
        joined_rows: table.joined_rows,
        training_rows,
        dropped_missing_label: table.dropped_missing_label(),
        n_features: x.ncols(),
        feature_input: config.feature_input(),
        output_path: config.output_path().to_path_buf(),
        seed: config.seed(),
    })
}
