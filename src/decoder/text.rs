//! Single-column fallbacks for text, HTML and opaque payloads.
//!
//! None of these can reject their input: text is decoded lossily and binary
//! content is stored untouched.

use polars::prelude::*;

/// Column holding one line of text per row
pub const TEXT_COLUMN: &str = "Contenido";

/// Column holding a whole HTML document in one row
pub const HTML_COLUMN: &str = "HTML";

/// Column holding the raw payload of an unrecognised file
pub const BYTES_COLUMN: &str = "Bytes";

/// One row per line; invalid UTF-8 sequences are replaced
pub fn decode_lines(content: &[u8]) -> PolarsResult<DataFrame> {
    let text = String::from_utf8_lossy(content);
    let lines: Vec<&str> = text.lines().collect();

    DataFrame::new(vec![Column::new(TEXT_COLUMN.into(), lines)])
}

/// The whole document in a single row
pub fn decode_html(content: &[u8]) -> PolarsResult<DataFrame> {
    let text = String::from_utf8_lossy(content);

    DataFrame::new(vec![Column::new(HTML_COLUMN.into(), [&*text])])
}

/// The payload unchanged, as one binary cell
pub fn decode_bytes(content: &[u8]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![Column::new(BYTES_COLUMN.into(), [content])])
}
