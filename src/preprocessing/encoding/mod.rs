//! Categorical feature encoding transformers.
//!
//! ## OneHotEncoder
//! Converts each categorical column into binary indicator columns, one per
//! category seen during fit.
//!
//! ```text
//! // Input:  cf20m128 = ["A", "B", "A"]
//! // Output: [[1, 0], [0, 1], [1, 0]]
//! ```
//!
//! ## OrdinalEncoder
//! Maps categorical values to integer ordinals (0, 1, 2, ...) following the
//! sorted category list.
//!
//! # Categories
//!
//! Cells of any column type are read as a [`Category`]. Integer cells and
//! integral floats compare as integers, so a survey code stored as `3` and one
//! stored as `3.0` fall in the same category. Everything else is compared as text.

mod one_hot;
mod ordinal;

pub use one_hot::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};
pub use ordinal::{FittedOrdinalEncoder, OrdinalEncoder, OrdinalEncoderParams};

use crate::frame::{column_values, Value};
use crate::preprocessing::error::PreprocessingError;
use polars::prelude::Column;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy for handling unknown categories during one-hot transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Raise an error when unknown categories are encountered.
    #[default]
    Error,
    /// Encode unknown categories as an all-zero block.
    Ignore,
}

/// A single categorical value as learned by the encoders.
///
/// Ordering puts [`Category::Missing`] first, then integers, then text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Missing,
    Int(i64),
    Text(String),
}

impl Category {
    /// Reads a cell as a category.
    pub fn from_value(value: Value<'_>) -> Self {
        match value {
            Value::Null => Category::Missing,
            Value::Int(v) => Category::Int(v),
            Value::Float(v) if v.is_nan() => Category::Missing,
            Value::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                Category::Int(v as i64)
            }
            Value::Float(v) => Category::Text(v.to_string()),
            Value::Str(v) => Category::Text(v.to_string()),
        }
    }

    /// Returns `true` for [`Category::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Category::Missing)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Missing => write!(f, "<missing>"),
            Category::Int(v) => write!(f, "{}", v),
            Category::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Reads every cell of `column` as a category.
fn categories_of(column: &Column) -> Result<Vec<Category>, PreprocessingError> {
    Ok(column_values(column)?
        .into_iter()
        .map(Category::from_value)
        .collect())
}

/// Sorted, deduplicated categories of `column`.
fn sorted_categories(column: &Column) -> Result<Vec<Category>, PreprocessingError> {
    let mut cats = categories_of(column)?;
    cats.sort();
    cats.dedup();
    Ok(cats)
}
