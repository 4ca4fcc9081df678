//! Schema of the respondent and outcome tables and assembly of training data.
//!
//! Training rows come from an inner join of the respondent table (features)
//! with the outcome table (labels) on the respondent identifier, keeping only
//! rows whose label is present.

use crate::frame::{column_values, drop_missing, inner_join, FrameError, Value};
use log::debug;
use ndarray::Array1;
use polars::prelude::{DataFrame, PolarsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default respondent identifier column.
pub const ID_COLUMN: &str = "nomem_encr";
/// Default label column: whether the respondent had a new child.
pub const LABEL_COLUMN: &str = "new_child";

/// Errors raised while assembling training data.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// A label cell is neither a 0/1 number nor a boolean-like string.
    #[error("Invalid label '{value}' in column '{column}' at row {row}")]
    InvalidLabel {
        column: String,
        row: usize,
        value: String,
    },

    /// A label cell is missing.
    #[error("Missing label in column '{column}' at row {row}")]
    MissingLabel { column: String, row: usize },
}

/// How a selected column is meant to be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    /// A quantity (age, income).
    Numeric,
    /// A code from a fixed answer set (survey response, region).
    Categorical,
    /// The respondent identifier.
    Identifier,
}

/// A selected feature column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub kind: FeatureKind,
}

impl FeatureSpec {
    pub fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Names and roles of the columns used for training.
///
/// The default selects, in order: `age`, `cf20m128`, `oplzon_2020`,
/// `nettohh_f_2020`, `nomem_encr`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Join key shared by both tables.
    pub id_column: String,
    /// Binary outcome column in the outcome table.
    pub label_column: String,
    /// Selected feature columns, in selection order.
    pub features: Vec<FeatureSpec>,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self {
            id_column: ID_COLUMN.to_string(),
            label_column: LABEL_COLUMN.to_string(),
            features: vec![
                FeatureSpec::new("age", FeatureKind::Numeric),
                FeatureSpec::new("cf20m128", FeatureKind::Categorical),
                FeatureSpec::new("oplzon_2020", FeatureKind::Categorical),
                FeatureSpec::new("nettohh_f_2020", FeatureKind::Numeric),
                FeatureSpec::new(ID_COLUMN, FeatureKind::Identifier),
            ],
        }
    }
}

impl FeatureSchema {
    /// Selected feature names, in selection order.
    pub fn feature_names(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name.clone()).collect()
    }

    /// Names of the selected features of the given kind, in selection order.
    pub fn columns_of(&self, kind: FeatureKind) -> Vec<String> {
        self.features
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| f.name.clone())
            .collect()
    }
}

/// The joined, label-filtered training table.
#[derive(Clone, Debug)]
pub struct TrainingTable {
    /// Rows with a present label.
    pub frame: DataFrame,
    /// Rows produced by the join, before label filtering.
    pub joined_rows: usize,
}

impl TrainingTable {
    /// Rows removed because their label was missing.
    pub fn dropped_missing_label(&self) -> usize {
        self.joined_rows - self.frame.height()
    }
}

/// Joins `respondents` with `outcomes` on the id column and drops rows whose
/// label is missing.
///
/// Respondents without an outcome row and outcome rows without a respondent are
/// both dropped. Every row of the result has a present label.
pub fn build_training_table(
    respondents: &DataFrame,
    outcomes: &DataFrame,
    schema: &FeatureSchema,
) -> Result<TrainingTable, DatasetError> {
    // Fail on a missing label column even when the join would be empty.
    outcomes.column(&schema.label_column)?;

    let joined = inner_join(respondents, outcomes, &schema.id_column)?;
    let frame = drop_missing(&joined, &schema.label_column)?;
    debug!(
        "joined {} respondent rows with {} outcome rows into {} rows, {} with a label",
        respondents.height(),
        outcomes.height(),
        joined.height(),
        frame.height()
    );

    Ok(TrainingTable {
        frame,
        joined_rows: joined.height(),
    })
}

fn parse_label(value: Value<'_>) -> Option<bool> {
    match value {
        Value::Int(0) => Some(false),
        Value::Int(1) => Some(true),
        Value::Float(v) if v == 0.0 => Some(false),
        Value::Float(v) if v == 1.0 => Some(true),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "0" | "false" => Some(false),
            "1" | "true" => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Reads the label column of `frame` as booleans.
///
/// Accepts the numbers 0/1 and the strings `0`, `1`, `true`, `false`
/// (case-insensitive).
pub fn extract_labels(
    frame: &DataFrame,
    schema: &FeatureSchema,
) -> Result<Array1<bool>, DatasetError> {
    column_values(frame.column(&schema.label_column)?)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            if value.is_null() {
                return Err(DatasetError::MissingLabel {
                    column: schema.label_column.clone(),
                    row,
                });
            }
            parse_label(value).ok_or_else(|| DatasetError::InvalidLabel {
                column: schema.label_column.clone(),
                row,
                value: value.to_string(),
            })
        })
        .collect()
}
