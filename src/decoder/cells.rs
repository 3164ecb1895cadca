//! Loosely typed cells and their conversion into typed columns.
//!
//! JSON documents and spreadsheets can mix value types within one column.
//! Cells are collected first and each column settles on the narrowest type
//! that holds every non-null value, falling back to text.

use polars::prelude::*;

/// A single value read from a semi-structured source
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Bool(b) => Some(b.to_string()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => Some(f.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Column types a list of cells can settle on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Boolean,
    Integer,
    Float,
    Text,
}

fn infer_kind(cells: &[Cell]) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;

    for cell in cells {
        let cell_kind = match cell {
            Cell::Null => continue,
            Cell::Bool(_) => ColumnKind::Boolean,
            Cell::Int(_) => ColumnKind::Integer,
            Cell::Float(_) => ColumnKind::Float,
            Cell::Text(_) => return ColumnKind::Text,
        };

        kind = Some(match (kind, cell_kind) {
            (None, k) => k,
            (Some(a), b) if a == b => a,
            (Some(ColumnKind::Integer), ColumnKind::Float)
            | (Some(ColumnKind::Float), ColumnKind::Integer) => ColumnKind::Float,
            _ => return ColumnKind::Text,
        });
    }

    // An all-null column has nothing to infer from
    kind.unwrap_or(ColumnKind::Text)
}

/// Build a typed column from loosely typed cells
pub fn build_column(name: &str, cells: &[Cell]) -> Column {
    match infer_kind(cells) {
        ColumnKind::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|c| match c {
                    Cell::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        ColumnKind::Integer => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|c| match c {
                    Cell::Int(i) => Some(*i),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(Cell::as_f64).collect();
            Column::new(name.into(), values)
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(Cell::as_text).collect();
            Column::new(name.into(), values)
        }
    }
}

/// Assemble named cell columns into a table
pub fn frame_from_cells(columns: Vec<(String, Vec<Cell>)>) -> PolarsResult<DataFrame> {
    if columns.is_empty() {
        return Ok(DataFrame::empty());
    }

    let columns = columns
        .iter()
        .map(|(name, cells)| build_column(name, cells))
        .collect();

    DataFrame::new(columns)
}

/// Header labels as column names; blank labels become "Unnamed: <index>"
/// and repeats are made unique
pub fn header_names(labels: Vec<String>) -> Vec<String> {
    let names = labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            let label = label.trim();
            if label.is_empty() {
                format!("Unnamed: {}", index)
            } else {
                label.to_string()
            }
        })
        .collect();

    unique_names(names)
}

/// Make column names unique by suffixing repeats with ".1", ".2", ...
pub fn unique_names(names: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        seen.push(candidate);
    }

    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_float_widen_to_float() {
        let cells = vec![Cell::Int(1), Cell::Null, Cell::Float(2.5)];
        let column = build_column("valor", &cells);
        assert_eq!(column.dtype(), &DataType::Float64);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_mixed_values_fall_back_to_text() {
        let cells = vec![Cell::Int(1), Cell::Bool(true), Cell::Text("x".to_string())];
        let column = build_column("mixto", &cells);
        assert_eq!(column.dtype(), &DataType::String);
    }

    #[test]
    fn test_all_null_column_is_text() {
        let column = build_column("vacio", &[Cell::Null, Cell::Null]);
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(column.len(), 2);
    }

    #[test]
    fn test_unique_names() {
        let names = vec![
            "area".to_string(),
            "area".to_string(),
            "fecha".to_string(),
            "area".to_string(),
        ];
        assert_eq!(unique_names(names), vec!["area", "area.1", "fecha", "area.2"]);
    }

    #[test]
    fn test_header_names_fill_blanks_and_dedup() {
        let labels = vec![
            "fecha".to_string(),
            " ".to_string(),
            "area".to_string(),
            "area".to_string(),
        ];
        assert_eq!(
            header_names(labels),
            vec!["fecha", "Unnamed: 1", "area", "area.1"]
        );
    }

    #[test]
    fn test_empty_frame() {
        let frame = frame_from_cells(Vec::new()).unwrap();
        assert_eq!(frame.width(), 0);
    }
}
