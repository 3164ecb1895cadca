//! Upload history and quality summary.
//!
//! Every call recomputes the rows from the catalog; nothing is cached.

use crate::catalog::Catalog;
use crate::classifier::Category;
use crate::constants::{
    DATE_FORMAT, INCONSISTENCY_NOTICE, MIN_CONSISTENT_SIZE, UNKNOWN_AUTHOR, UNSPECIFIED_UNIT,
    history_columns as cols,
};
use crate::error::Result;
use crate::models::UploadRecord;
use crate::scanner::write_csv;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;

/// One line of the history table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub filename: String,
    pub category: Category,
    /// Upper-cased extension
    pub format: String,
    pub upload_date: NaiveDate,
    pub variable_count: usize,
    pub row_count: usize,
    pub author: String,
    pub unit: String,
    pub inconsistency: bool,
}

/// Heuristic: too few variables or rows to be a usable dataset
pub fn is_inconsistent(record: &UploadRecord) -> bool {
    record.variable_count() < MIN_CONSISTENT_SIZE || record.row_count() < MIN_CONSISTENT_SIZE
}

/// Summarize the catalog with the default placeholders
pub fn summarize(catalog: &Catalog) -> Vec<SummaryRow> {
    summarize_with(catalog, UNKNOWN_AUTHOR, UNSPECIFIED_UNIT)
}

/// Summarize the catalog, filling missing author/unit with the given texts
pub fn summarize_with(
    catalog: &Catalog,
    unknown_author: &str,
    unspecified_unit: &str,
) -> Vec<SummaryRow> {
    catalog
        .iter()
        .map(|record| SummaryRow {
            filename: record.filename.clone(),
            category: record.category,
            format: record.extension.to_uppercase(),
            upload_date: record.uploaded_at,
            variable_count: record.variable_count(),
            row_count: record.row_count(),
            author: record
                .author
                .clone()
                .unwrap_or_else(|| unknown_author.to_string()),
            unit: record
                .unit
                .clone()
                .unwrap_or_else(|| unspecified_unit.to_string()),
            inconsistency: is_inconsistent(record),
        })
        .collect()
}

/// Render summary rows as the history table
pub fn summary_frame(rows: &[SummaryRow]) -> PolarsResult<DataFrame> {
    let files: Vec<&str> = rows.iter().map(|r| r.filename.as_str()).collect();
    let categories: Vec<&str> = rows.iter().map(|r| r.category.label()).collect();
    let formats: Vec<&str> = rows.iter().map(|r| r.format.as_str()).collect();
    let dates: Vec<String> = rows
        .iter()
        .map(|r| r.upload_date.format(DATE_FORMAT).to_string())
        .collect();
    let variables: Vec<u64> = rows.iter().map(|r| r.variable_count as u64).collect();
    let authors: Vec<&str> = rows.iter().map(|r| r.author.as_str()).collect();
    let units: Vec<&str> = rows.iter().map(|r| r.unit.as_str()).collect();
    let flags: Vec<&str> = rows
        .iter()
        .map(|r| if r.inconsistency { INCONSISTENCY_NOTICE } else { "" })
        .collect();

    DataFrame::new(vec![
        Column::new(cols::FILE.into(), files),
        Column::new(cols::CATEGORY.into(), categories),
        Column::new(cols::FORMAT.into(), formats),
        Column::new(cols::UPLOAD_DATE.into(), dates),
        Column::new(cols::VARIABLES.into(), variables),
        Column::new(cols::AUTHOR.into(), authors),
        Column::new(cols::UNIT.into(), units),
        Column::new(cols::FLAG.into(), flags),
    ])
}

/// Write the history table to a CSV file
pub fn export_csv(rows: &[SummaryRow], path: &Path) -> Result<()> {
    let mut table = summary_frame(rows)?;
    write_csv(&mut table, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawFile, Submitter};
    use tempfile::TempDir;

    fn add(catalog: &mut Catalog, name: &str, table: DataFrame, submitter: Submitter) {
        let raw = RawFile::new(name, Vec::new());
        let record = UploadRecord::new(
            &raw,
            table,
            crate::classifier::classify(name),
            submitter,
            NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
        );
        catalog.add(record);
    }

    fn table(columns: usize, rows: usize) -> DataFrame {
        let columns = (0..columns)
            .map(|c| {
                let values: Vec<i64> = (0..rows as i64).collect();
                Column::new(format!("v{}", c).into(), values)
            })
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_inconsistency_flag() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "una_variable.csv", table(1, 10), Submitter::anonymous());
        add(&mut catalog, "una_fila.csv", table(3, 1), Submitter::anonymous());
        add(&mut catalog, "completo.csv", table(2, 2), Submitter::anonymous());

        let rows = summarize(&catalog);
        let flags: Vec<bool> = rows.iter().map(|r| r.inconsistency).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_placeholders_and_format() {
        let mut catalog = Catalog::new();
        add(
            &mut catalog,
            "impacto.xlsx",
            table(2, 2),
            Submitter::new(Some("Ana".to_string()), None),
        );

        let row = &summarize(&catalog)[0];
        assert_eq!(row.format, "XLSX");
        assert_eq!(row.author, "Ana");
        assert_eq!(row.unit, "No especificada");
        assert_eq!(row.category, Category::SocialImpact);
        assert_eq!(row.variable_count, 2);

        let custom = &summarize_with(&catalog, "Unknown", "Not specified")[0];
        assert_eq!(custom.unit, "Not specified");
    }

    #[test]
    fn test_rows_follow_catalog_order() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "b.csv", table(2, 2), Submitter::anonymous());
        add(&mut catalog, "a.csv", table(2, 2), Submitter::anonymous());

        let names: Vec<String> = summarize(&catalog).into_iter().map(|r| r.filename).collect();
        assert_eq!(names, vec!["b.csv", "a.csv"]);
        assert_eq!(summarize(&catalog)[0].author, "Desconocido");
    }

    #[test]
    fn test_export_csv() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "ambiental.csv", table(4, 2), Submitter::anonymous());
        add(&mut catalog, "nota.txt", table(1, 1), Submitter::anonymous());

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("historial.csv");
        export_csv(&summarize(&catalog), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Archivo,Categoría,Formato,Fecha de carga,Variables detectadas,Autor,Unidad,Alerta"
        );
        assert!(lines[1].starts_with(
            "ambiental.csv,Indicadores Ambientales,CSV,2025-05-15,4,Desconocido,No especificada,"
        ));
        assert!(!lines[1].contains(INCONSISTENCY_NOTICE));
        assert!(lines[2].ends_with("Posible inconsistencia"));
    }

    #[test]
    fn test_empty_history_frame() {
        let frame = summary_frame(&[]).unwrap();
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 0);
    }
}
