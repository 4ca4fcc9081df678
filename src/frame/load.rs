//! CSV loading.

use crate::frame::FrameError;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// Cell spellings read as missing, in addition to empty fields.
pub const NULL_TOKENS: &[&str] = &["NA", "NaN", "nan", "null"];

fn csv_options() -> CsvReadOptions {
    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
}

/// Reads a headed CSV table from memory.
///
/// Column types are inferred from every row: integer, then float, then string.
/// Empty fields and [`NULL_TOKENS`] are missing.
pub fn read_csv(text: impl AsRef<[u8]>) -> Result<DataFrame, FrameError> {
    let cursor = Cursor::new(text.as_ref().to_vec());
    Ok(csv_options().into_reader_with_file_handle(cursor).finish()?)
}

/// Reads a headed CSV file. See [`read_csv`].
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<DataFrame, FrameError> {
    let file = std::fs::File::open(path)?;
    Ok(csv_options().into_reader_with_file_handle(file).finish()?)
}
