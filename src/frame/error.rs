//! Error type for table access, joins and loading.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Error type for reading cells, joining and loading tables.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Missing column, failed cast, malformed CSV and other polars failures.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// Join keys whose types cannot be matched.
    #[error("Cannot join on '{column}': left key is {left}, right key is {right}")]
    KeyTypeMismatch {
        column: String,
        left: String,
        right: String,
    },

    /// A column whose cells are neither numbers, booleans nor strings.
    #[error("Column '{column}' has unsupported type {dtype}")]
    UnsupportedType { column: String, dtype: String },

    /// I/O error while opening a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
