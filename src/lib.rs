//! # prefer-train
//!
//! Trains a binary logistic regression that predicts whether a survey
//! respondent had a new child, and persists it for later scoring.
//!
//! ## Core Design Principles
//!
//! - **Training/Inference Separation**: the persisted [`PredictivePipeline`]
//!   holds only fitted parameters; hyperparameters and training data stay with
//!   [`TrainingConfig`].
//! - **Explicit feature input**: whether the classifier sees the raw selected
//!   columns or the one-hot/scaled transform is a configuration value
//!   ([`FeatureInput`]), recorded in the artifact.
//! - **External fitting**: the optimizer is provided by `linfa-logistic`.
//!
//! ## Quick Start
//!
//! ```rust
//! use polars::prelude::*;
//! use prefer_train::{train_and_save_model, PredictivePipeline, TrainingConfig};
//!
//! let respondents = df!(
//!     "nomem_encr" => [1i64, 2],
//!     "age" => [30i64, 40],
//!     "cf20m128" => ["A", "B"],
//!     "oplzon_2020" => ["Z", "Y"],
//!     "nettohh_f_2020" => [1000.0, 2000.0],
//! )
//! .unwrap();
//! let outcomes = df!(
//!     "nomem_encr" => [1i64, 2],
//!     "new_child" => [1i64, 0],
//! )
//! .unwrap();
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = TrainingConfig::builder()
//!     .output_path(dir.path().join("model.bin"))
//!     .build();
//!
//! let report = train_and_save_model(&respondents, &outcomes, &config).unwrap();
//! assert_eq!(report.training_rows, 2);
//!
//! let model = PredictivePipeline::load_from_file(config.output_path()).unwrap();
//! assert_eq!(model.predict_proba(&respondents).unwrap().len(), 2);
//! ```
//!
//! ## Module Structure
//!
//! - `frame`: polars helpers: typed cell access, inner join, CSV loading
//! - `dataset`: feature schema, training table assembly, label parsing
//! - `preprocessing`: encoders, scaler and the column transformer
//! - `model`: logistic regression and the inference trait
//! - `pipeline`: the persisted encoder + classifier artifact
//! - `serialization`: bincode persistence of parameter structs
//! - `training`: configuration and [`train_and_save_model`]

pub mod dataset;
pub mod frame;
pub mod model;
pub mod pipeline;
pub mod preprocessing;
pub mod serialization;
pub mod training;

pub use dataset::{FeatureKind, FeatureSchema, FeatureSpec};
pub use frame::{read_csv, read_csv_path, FrameError};
pub use pipeline::{PipelineError, PredictivePipeline};
pub use training::{
    train_and_save_model, FeatureInput, TrainingConfig, TrainingError, TrainingReport,
};
