//! Tests for the format decoder
//!
//! Helpers here pull typed values back out of decoded tables.

use polars::prelude::*;

mod decode_tests;

/// String values of a column, nulls as None
pub fn strings(table: &DataFrame, name: &str) -> Vec<Option<String>> {
    table
        .column(name)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

/// Integer values of a column, nulls as None
pub fn integers(table: &DataFrame, name: &str) -> Vec<Option<i64>> {
    table
        .column(name)
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Column names in table order
pub fn names(table: &DataFrame) -> Vec<String> {
    table
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect()
}
