//! JSON documents as tables.
//!
//! Accepted shapes:
//! - `[{..}, {..}]` records; columns are the union of keys in encounter order
//! - `[[..], [..]]` positional rows; columns are named "0", "1", ...
//! - `[1, "a", ..]` any other array; a single column named "0"
//! - `{"col": [..], ..}` column-oriented mapping of equal-length arrays
//! - `{"col": {"row": ..}, ..}` column-oriented mapping keyed by row label
//! - `{"key": value, ..}` anything else becomes a single record

use super::cells::{Cell, frame_from_cells};
use crate::error::DecodeCause;
use polars::prelude::DataFrame;
use serde_json::{Map, Value};

type CellColumns = Vec<(String, Vec<Cell>)>;

/// Parse a JSON document into a table
pub fn decode_json(content: &[u8]) -> Result<DataFrame, DecodeCause> {
    let document: Value = serde_json::from_slice(content)?;

    let columns = match document {
        Value::Array(items) => from_array(items),
        Value::Object(map) => from_object(map)?,
        other => {
            return Err(DecodeCause::Shape(format!(
                "expected an array or object at the top level, found {}",
                value_kind(&other)
            )));
        }
    };

    Ok(frame_from_cells(columns)?)
}

fn from_array(items: Vec<Value>) -> CellColumns {
    if items.is_empty() {
        return Vec::new();
    }

    if items.iter().all(Value::is_object) {
        let rows: Vec<Map<String, Value>> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        return from_records(&rows);
    }

    if items.iter().all(Value::is_array) {
        return from_positional(&items);
    }

    let cells = items.iter().map(cell_from_json).collect();
    vec![("0".to_string(), cells)]
}

fn from_records(rows: &[Map<String, Value>]) -> CellColumns {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    names
        .into_iter()
        .map(|name| {
            let cells = rows
                .iter()
                .map(|row| row.get(&name).map(cell_from_json).unwrap_or(Cell::Null))
                .collect();
            (name, cells)
        })
        .collect()
}

fn from_positional(rows: &[Value]) -> CellColumns {
    let width = rows
        .iter()
        .filter_map(Value::as_array)
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    (0..width)
        .map(|index| {
            let cells = rows
                .iter()
                .map(|row| {
                    row.as_array()
                        .and_then(|values| values.get(index))
                        .map(cell_from_json)
                        .unwrap_or(Cell::Null)
                })
                .collect();
            (index.to_string(), cells)
        })
        .collect()
}

fn from_object(map: Map<String, Value>) -> Result<CellColumns, DecodeCause> {
    if map.is_empty() {
        return Ok(Vec::new());
    }

    if map.values().all(Value::is_array) {
        return from_column_arrays(&map);
    }

    if map.values().all(Value::is_object) {
        return Ok(from_column_objects(&map));
    }

    Ok(from_records(std::slice::from_ref(&map)))
}

fn from_column_arrays(map: &Map<String, Value>) -> Result<CellColumns, DecodeCause> {
    let mut expected_len: Option<usize> = None;
    let mut columns = Vec::with_capacity(map.len());

    for (name, values) in map {
        let values = values.as_array().map(Vec::as_slice).unwrap_or(&[]);

        match expected_len {
            None => expected_len = Some(values.len()),
            Some(len) if len != values.len() => {
                return Err(DecodeCause::Shape(format!(
                    "column '{}' has {} values, expected {}",
                    name,
                    values.len(),
                    len
                )));
            }
            Some(_) => {}
        }

        columns.push((name.clone(), values.iter().map(cell_from_json).collect()));
    }

    Ok(columns)
}

fn from_column_objects(map: &Map<String, Value>) -> CellColumns {
    let mut index: Vec<&String> = Vec::new();
    for inner in map.values().filter_map(Value::as_object) {
        for key in inner.keys() {
            if !index.contains(&key) {
                index.push(key);
            }
        }
    }

    map.iter()
        .map(|(name, inner)| {
            let cells = index
                .iter()
                .map(|row| {
                    inner
                        .get(row.as_str())
                        .map(cell_from_json)
                        .unwrap_or(Cell::Null)
                })
                .collect();
            (name.clone(), cells)
        })
        .collect()
}

fn cell_from_json(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
        },
        Value::String(s) => Cell::Text(s.clone()),
        nested => Cell::Text(nested.to_string()),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
