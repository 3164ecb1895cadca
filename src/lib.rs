//! Sustainability Intake Library
//!
//! Collects sustainability data files (uploaded by hand or dropped into an
//! input directory), decodes them into tables, classifies them by file name
//! and keeps a per-session catalog with a quality report.
//!
//! This library provides tools for:
//! - Decoding CSV, Excel, JSON, text, HTML and arbitrary binary files
//! - Classifying files into social impact or environmental datasets
//! - Cataloguing uploads with author, unit and upload date
//! - Scanning an input directory idempotently, seeding it with demo data
//! - Summarizing the catalog and flagging suspiciously small datasets
//!
//! # Example
//!
//! ```no_run
//! use sustainability_intake::{IntakeConfig, RawFile, Session, Submitter};
//!
//! let mut session = Session::new(IntakeConfig::default());
//! let file = RawFile::new("ambiental_q2.csv", "fecha,consumo\n2025-04-01,10\n");
//! session.upload(vec![file], &Submitter::anonymous());
//! session.scan_input()?;
//!
//! for row in session.history() {
//!     println!("{} -> {}", row.filename, row.category);
//! }
//! # Ok::<(), sustainability_intake::IntakeError>(())
//! ```

pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod datasets;
pub mod decoder;
pub mod error;
pub mod history;
pub mod ingest;
pub mod models;
pub mod scanner;
pub mod session;

// Re-export commonly used types
pub use catalog::Catalog;
pub use classifier::{Category, classify};
pub use config::IntakeConfig;
pub use decoder::decode;
pub use error::{IntakeError, Result};
pub use history::{SummaryRow, summarize};
pub use ingest::{FileOutcome, IngestReport};
pub use models::{RawFile, Submitter, UploadRecord};
pub use scanner::scan;
pub use session::Session;
