//! Feature preprocessing for tabular survey data.
//!
//! Transformers read named, typed columns from a polars `DataFrame`
//! and produce dense `f64` feature matrices for the classifier.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer with hyperparameters
//! - [`FittedTransformer`]: Fitted transformer ready for inference and serialization
//!
//! # Available Transformers
//!
//! ## Encoding
//! - [`OneHotEncoder`]: Indicator columns per category
//! - [`OrdinalEncoder`]: Category to sorted ordinal
//!
//! ## Scaling
//! - [`StandardScaler`]: Z-score normalization
//!
//! ## Other
//! - [`Passthrough`]: Numeric columns copied as-is
//! - [`ColumnTransformer`]: Route named column subsets to different transformers
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use prefer_train::preprocessing::{
//!     ColumnTransformer, FittedColumnTransformer, FittedTransformer, StandardScaler,
//!     Transformer,
//! };
//!
//! let data = df!(
//!     "age" => [30.0, 40.0],
//!     "nettohh_f_2020" => [1000.0, 2000.0],
//! )
//! .unwrap();
//!
//! let fitted = ColumnTransformer::new()
//!     .add_standard_scaler(StandardScaler::new(), &["age"])
//!     .add_passthrough(&["nettohh_f_2020"])
//!     .fit(&data)
//!     .unwrap();
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("preprocessor.bin");
//! fitted.save_to_file(&path).unwrap();
//!
//! let loaded = FittedColumnTransformer::load_from_file(&path).unwrap();
//! assert_eq!(loaded.transform(&data).unwrap(), fitted.transform(&data).unwrap());
//! ```

pub mod column_transformer;
pub mod encoding;
pub mod error;
pub mod passthrough;
pub mod scaling;
pub mod traits;

pub use column_transformer::{
    ColumnTransformer, ColumnTransformerParams, ColumnTransformerStep, FittedColumnTransformer,
    FittedColumnTransformerStep, StepParams,
};
pub use encoding::{
    Category, FittedOneHotEncoder, FittedOrdinalEncoder, HandleUnknown, OneHotEncoder,
    OneHotEncoderParams, OrdinalEncoder, OrdinalEncoderParams,
};
pub use error::PreprocessingError;
pub use passthrough::{FittedPassthrough, Passthrough, PassthroughParams};
pub use scaling::{
    FittedStandardScaler, StandardScaler, StandardScalerConfig, StandardScalerParams,
};
pub use traits::{FittedTransformer, Transformer};
