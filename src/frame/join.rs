//! Inner join on a shared key column.

use crate::frame::FrameError;
use polars::prelude::*;

const LEFT_ROW: &str = "__left_row";
const RIGHT_ROW: &str = "__right_row";

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// `df` with its key column cast to `Float64`.
fn with_float_key(df: &DataFrame, on: &str) -> Result<DataFrame, FrameError> {
    let key = df
        .column(on)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let mut df = df.clone();
    df.with_column(key)?;
    Ok(df)
}

/// Inner-joins `left` with `right` on the column `on`.
///
/// - Only rows whose key appears on both sides are kept; null keys never match.
/// - A key matching several rows on either side yields every combination.
/// - Output rows follow left row order, then right row order within a key.
/// - Output columns are the left columns followed by the right columns
///   without the key. Right columns whose name is already taken get a
///   `_right` suffix.
/// - Integer and float keys are matched by value: both sides are compared as
///   `Float64`, and the key column of the result is `Float64`.
///
/// # Errors
/// [`FrameError::Polars`] if either side lacks `on`, and
/// [`FrameError::KeyTypeMismatch`] if the key types cannot be compared.
pub fn inner_join(left: &DataFrame, right: &DataFrame, on: &str) -> Result<DataFrame, FrameError> {
    let left_type = left.column(on)?.dtype().clone();
    let right_type = right.column(on)?.dtype().clone();

    let (left, right) = if left_type == right_type {
        (left.clone(), right.clone())
    } else if is_numeric(&left_type) && is_numeric(&right_type) {
        (with_float_key(left, on)?, with_float_key(right, on)?)
    } else {
        return Err(FrameError::KeyTypeMismatch {
            column: on.to_string(),
            left: left_type.to_string(),
            right: right_type.to_string(),
        });
    };

    let left = left.with_row_index(LEFT_ROW.into(), None)?;
    let right = right.with_row_index(RIGHT_ROW.into(), None)?;

    let joined = left
        .inner_join(&right, [on], [on])?
        .sort([LEFT_ROW, RIGHT_ROW], SortMultipleOptions::default())?;
    Ok(joined.drop(LEFT_ROW)?.drop(RIGHT_ROW)?)
}
