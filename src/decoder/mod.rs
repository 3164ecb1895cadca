//! Format decoder: turns a named byte payload into a table.
//!
//! Dispatch happens on the closed [`FileFormat`] set derived from the file
//! extension, with one conversion function per format:
//! - [`decode_csv`] - delimited text with a header row (polars CSV reader)
//! - [`spreadsheet`] - first sheet of an xls/xlsx workbook
//! - [`json`] - records, positional arrays or column-oriented objects
//! - [`text`] - permissive text, HTML and raw-byte fallbacks
//!
//! Only the structured formats can fail. Their failures come back as
//! [`IntakeError::Decode`] carrying the filename, so batch callers can report
//! the file and move on.
//!
//! ## Usage
//!
//! ```rust
//! use sustainability_intake::decoder::decode;
//!
//! let table = decode("notas.txt", b"a\nb\nc").unwrap();
//! assert_eq!(table.height(), 3);
//! ```

pub mod cells;
pub mod json;
pub mod spreadsheet;
pub mod text;

#[cfg(test)]
mod tests;

use cells::header_names;
use crate::error::{DecodeCause, IntakeError, Result};
use crate::models::{FileFormat, RawFile, extension_of};
use polars::prelude::*;
use std::io::Cursor;
use tracing::debug;

pub use text::{BYTES_COLUMN, HTML_COLUMN, TEXT_COLUMN};

/// Decode a file into a table, choosing the conversion from its extension
pub fn decode(name: &str, content: &[u8]) -> Result<DataFrame> {
    let format = FileFormat::from_extension(&extension_of(name));
    decode_as(name, format, content)
}

/// Decode an already-read file
pub fn decode_file(raw: &RawFile) -> Result<DataFrame> {
    decode_as(&raw.name, raw.format(), &raw.bytes)
}

fn decode_as(name: &str, format: FileFormat, content: &[u8]) -> Result<DataFrame> {
    debug!("Decoding {} ({} bytes) as {}", name, content.len(), format);

    let table = match format {
        FileFormat::Csv => decode_csv(content).map_err(DecodeCause::from),
        FileFormat::Spreadsheet => spreadsheet::decode_spreadsheet(content),
        FileFormat::Json => json::decode_json(content),
        FileFormat::Text => text::decode_lines(content).map_err(DecodeCause::from),
        FileFormat::Html => text::decode_html(content).map_err(DecodeCause::from),
        FileFormat::Binary => text::decode_bytes(content).map_err(DecodeCause::from),
    }
    .map_err(|cause| IntakeError::decode(name, format, cause))?;

    debug!(
        "Decoded {}: {} columns x {} rows",
        name,
        table.width(),
        table.height()
    );

    Ok(table)
}

/// Parse delimited text whose first row is the header.
///
/// Column types are inferred from every row. Header labels go through the
/// same blank/duplicate handling as spreadsheet headers.
pub fn decode_csv(content: &[u8]) -> PolarsResult<DataFrame> {
    let table = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(content.to_vec()))
        .finish()?;

    let labels = csv_header(content)?;
    if labels.len() != table.width() {
        return Ok(table);
    }

    let columns = table
        .take_columns()
        .into_iter()
        .zip(header_names(labels))
        .map(|(mut column, name)| {
            column.rename(name.into());
            column
        })
        .collect();

    DataFrame::new(columns)
}

/// First row of a CSV payload as raw text labels
fn csv_header(content: &[u8]) -> PolarsResult<Vec<String>> {
    let first_row = CsvReadOptions::default()
        .with_has_header(false)
        .with_n_rows(Some(1))
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(content.to_vec()))
        .finish()?;

    first_row
        .get_columns()
        .iter()
        .map(|column| -> PolarsResult<String> {
            let label = column.as_materialized_series().str()?.get(0);
            Ok(label.unwrap_or_default().to_string())
        })
        .collect()
}
