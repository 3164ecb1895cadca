//! Excel workbooks (xls/xlsx): first sheet, first row as header.

use super::cells::{Cell, frame_from_cells};
use crate::error::DecodeCause;
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use polars::prelude::DataFrame;
use std::io::Cursor;
use tracing::debug;

/// Read the first worksheet of a workbook into a table
pub fn decode_spreadsheet(content: &[u8]) -> Result<DataFrame, DecodeCause> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(DecodeCause::Shape("workbook contains no sheets".to_string())),
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        debug!("First sheet is empty");
        return Ok(DataFrame::empty());
    };

    let names = header_names(header);
    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];

    for row in rows {
        for (index, cells) in columns.iter_mut().enumerate() {
            cells.push(row.get(index).map(cell_from_sheet).unwrap_or(Cell::Null));
        }
    }

    Ok(frame_from_cells(names.into_iter().zip(columns).collect())?)
}

/// Header labels; blank cells get positional names like "Unnamed: 2"
fn header_names(header: &[Data]) -> Vec<String> {
    let labels = header
        .iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();

    super::cells::header_names(labels)
}

fn cell_from_sheet(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.trim().is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}
