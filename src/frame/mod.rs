//! Table helpers on top of [`polars`].
//!
//! Respondent and outcome tables are plain [`DataFrame`]s. This module adds
//! what the training procedure needs beyond polars itself: a typed cell view
//! shared by the encoders and the label parser, a row filter on missing
//! values, an order-preserving inner join and CSV loading with the survey's
//! missing-value spellings.
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use prefer_train::frame::inner_join;
//!
//! let respondents = df!(
//!     "nomem_encr" => [1i64, 2],
//!     "age" => [30.0, 40.0],
//! )
//! .unwrap();
//! let outcomes = df!(
//!     "nomem_encr" => [2i64],
//!     "new_child" => [0i64],
//! )
//! .unwrap();
//!
//! let joined = inner_join(&respondents, &outcomes, "nomem_encr").unwrap();
//! assert_eq!(joined.height(), 1);
//! assert_eq!(
//!     prefer_train::frame::column_names(&joined),
//!     ["nomem_encr", "age", "new_child"]
//! );
//! ```

pub mod error;
mod join;
mod load;

pub use error::FrameError;
pub use join::inner_join;
pub use load::{read_csv, read_csv_path, NULL_TOKENS};

use polars::prelude::*;
use std::fmt;

/// A borrowed view of a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    /// Missing value.
    Null,
    Int(i64),
    Float(f64),
    Str(&'a str),
}

impl Value<'_> {
    /// Returns `true` for [`Value::Null`] and for a float NaN.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
        }
    }
}

/// Reads every cell of `column`.
///
/// String columns yield [`Value::Str`], float columns [`Value::Float`], and
/// integer and boolean columns [`Value::Int`].
///
/// # Errors
/// [`FrameError::UnsupportedType`] for any other column type.
pub fn column_values(column: &Column) -> Result<Vec<Value<'_>>, FrameError> {
    let series = column.as_materialized_series();
    let dtype = series.dtype();

    if dtype == &DataType::String {
        return Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::Str))
            .collect());
    }
    if dtype.is_float() {
        let floats = series.cast(&DataType::Float64)?;
        return Ok(floats
            .f64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::Float))
            .collect());
    }
    if dtype.is_integer() || dtype == &DataType::Boolean {
        let ints = series.cast(&DataType::Int64)?;
        return Ok(ints
            .i64()?
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::Int))
            .collect());
    }
    Err(FrameError::UnsupportedType {
        column: series.name().to_string(),
        dtype: dtype.to_string(),
    })
}

/// Column names of `df`, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

/// Returns `df` without the rows where column `name` is missing (null or NaN).
pub fn drop_missing(df: &DataFrame, name: &str) -> Result<DataFrame, FrameError> {
    let keep: Vec<bool> = column_values(df.column(name)?)?
        .iter()
        .map(|v| !v.is_null())
        .collect();
    let mask = BooleanChunked::from_slice(name.into(), &keep);
    Ok(df.filter(&mask)?)
}
