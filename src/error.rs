//! Error handling for intake operations.
//!
//! Per-file failures (`Decode`, `Unreadable`) are recovered by the callers that
//! process batches; the remaining variants abort the operation that hit them.

use crate::models::FileFormat;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Could not decode '{filename}' as {format}: {source}")]
    Decode {
        filename: String,
        format: FileFormat,
        #[source]
        source: DecodeCause,
    },

    #[error("Could not read file: {path} - {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input directory unavailable: {path} - {source}")]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Underlying reason a structured file could not be turned into a table
#[derive(Error, Debug)]
pub enum DecodeCause {
    #[error(transparent)]
    Table(#[from] polars::error::PolarsError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error("{0}")]
    Shape(String),
}

impl IntakeError {
    /// Create a decode error for a file
    pub fn decode(
        filename: impl Into<String>,
        format: FileFormat,
        source: impl Into<DecodeCause>,
    ) -> Self {
        Self::Decode {
            filename: filename.into(),
            format,
            source: source.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error only concerns a single file and the batch can go on
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Unreadable { .. })
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;
