//! Core data structures for the intake pipeline.
//!
//! Defines the raw input file, the closed set of decodable formats, submitter
//! metadata and the catalogued upload record.

use crate::classifier::Category;
use crate::error::{IntakeError, Result};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Lower-cased extension after the last '.', empty when the name has none
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// A file as received, before decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub extension: String,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            bytes: bytes.into(),
            extension,
        }
    }

    /// Read a file fully into memory, naming it after its final path component
    pub fn read(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let bytes = std::fs::read(path).map_err(|source| IntakeError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(name, bytes))
    }

    pub fn format(&self) -> FileFormat {
        FileFormat::from_extension(&self.extension)
    }
}

/// Decodable formats, dispatched on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    Csv,
    Spreadsheet,
    Json,
    Text,
    Html,
    Binary,
}

impl FileFormat {
    /// Map a lower-cased extension to its format; unknown extensions are binary
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "csv" => FileFormat::Csv,
            "xls" | "xlsx" => FileFormat::Spreadsheet,
            "json" => FileFormat::Json,
            "txt" | "log" | "md" => FileFormat::Text,
            "html" | "htm" => FileFormat::Html,
            _ => FileFormat::Binary,
        }
    }

    /// Formats whose parsing can reject malformed content
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            FileFormat::Csv | FileFormat::Spreadsheet | FileFormat::Json
        )
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileFormat::Csv => "CSV",
            FileFormat::Spreadsheet => "spreadsheet",
            FileFormat::Json => "JSON",
            FileFormat::Text => "text",
            FileFormat::Html => "HTML",
            FileFormat::Binary => "binary",
        };
        f.write_str(label)
    }
}

/// Who submitted a manual upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub author: Option<String>,
    pub unit: Option<String>,
}

impl Submitter {
    /// Build submitter metadata, treating blank strings as unset
    pub fn new(author: Option<String>, unit: Option<String>) -> Self {
        Self {
            author: non_blank(author),
            unit: non_blank(unit),
        }
    }

    /// Metadata for files discovered by the directory scan
    pub fn anonymous() -> Self {
        Self::default()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A processed file held by the catalog
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub filename: String,
    pub extension: String,
    pub format: FileFormat,
    pub table: DataFrame,
    pub variables: Vec<String>,
    pub category: Category,
    pub author: Option<String>,
    pub unit: Option<String>,
    pub uploaded_at: NaiveDate,
}

impl UploadRecord {
    pub fn new(
        raw: &RawFile,
        table: DataFrame,
        category: Category,
        submitter: Submitter,
        uploaded_at: NaiveDate,
    ) -> Self {
        let variables = table
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        Self {
            filename: raw.name.clone(),
            extension: raw.extension.clone(),
            format: raw.format(),
            table,
            variables,
            category,
            author: submitter.author,
            unit: submitter.unit,
            uploaded_at,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn row_count(&self) -> usize {
        self.table.height()
    }
}
