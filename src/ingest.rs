//! Ingestion pipeline shared by manual uploads and the directory scan.
//!
//! Each file goes decode -> classify -> record -> catalog. A file that cannot
//! be decoded or read is reported and skipped; the rest of the batch carries
//! on. Outcomes are kept in input order.

use crate::catalog::{AddOutcome, Catalog};
use crate::classifier::{Category, classify};
use crate::decoder::decode_file;
use crate::error::{IntakeError, Result};
use crate::models::{RawFile, Submitter, UploadRecord};
use chrono::{Local, NaiveDate};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

/// Decode and classify one file into a catalog record
pub fn process_file(
    raw: &RawFile,
    submitter: Submitter,
    uploaded_at: NaiveDate,
) -> Result<UploadRecord> {
    let table = decode_file(raw)?;
    let category = classify(&raw.name);

    debug!(
        "Classified {} as {} ({} variables)",
        raw.name,
        category,
        table.width()
    );

    Ok(UploadRecord::new(raw, table, category, submitter, uploaded_at))
}

/// What happened to a single file of a batch
#[derive(Debug)]
pub enum FileOutcome {
    Added { filename: String, category: Category },
    Duplicate { filename: String },
    Failed { filename: String, error: IntakeError },
}

impl FileOutcome {
    pub fn filename(&self) -> &str {
        match self {
            FileOutcome::Added { filename, .. }
            | FileOutcome::Duplicate { filename }
            | FileOutcome::Failed { filename, .. } => filename,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Per-file outcomes of a batch, in processing order
#[derive(Debug, Default)]
pub struct IngestReport {
    outcomes: Vec<FileOutcome>,
}

impl IngestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// Move the outcomes of `other` to the end of this report
    pub fn append(&mut self, other: IngestReport) {
        self.outcomes.extend(other.outcomes);
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// Number of files added to the catalog
    pub fn added(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Added { .. }))
            .count()
    }

    /// Number of files skipped because their name was already catalogued
    pub fn duplicates(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Duplicate { .. }))
            .count()
    }

    /// Number of files that could not be processed
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Run one file through the pipeline into the catalog
pub fn ingest_one(
    catalog: &mut Catalog,
    raw: &RawFile,
    submitter: Submitter,
    uploaded_at: NaiveDate,
) -> FileOutcome {
    let filename = raw.name.clone();

    if catalog.contains(&filename) {
        debug!("Already catalogued, skipping: {}", filename);
        return FileOutcome::Duplicate { filename };
    }

    match process_file(raw, submitter, uploaded_at) {
        Ok(record) => {
            let category = record.category;
            match catalog.add(record) {
                AddOutcome::Added => {
                    info!("Processed '{}' as {}", filename, category);
                    FileOutcome::Added { filename, category }
                }
                AddOutcome::Duplicate => FileOutcome::Duplicate { filename },
            }
        }
        Err(error) => {
            warn!("Could not process '{}': {}", filename, error);
            FileOutcome::Failed { filename, error }
        }
    }
}

/// Ingest a batch of manually uploaded files
pub fn ingest_files<I>(catalog: &mut Catalog, files: I, submitter: &Submitter) -> IngestReport
where
    I: IntoIterator<Item = RawFile>,
{
    ingest_files_with_progress(catalog, files, submitter, &ProgressBar::hidden())
}

/// Ingest a batch, advancing `progress` once per file
pub fn ingest_files_with_progress<I>(
    catalog: &mut Catalog,
    files: I,
    submitter: &Submitter,
    progress: &ProgressBar,
) -> IngestReport
where
    I: IntoIterator<Item = RawFile>,
{
    let uploaded_at = Local::now().date_naive();
    let mut report = IngestReport::new();

    for raw in files {
        progress.set_message(format!("Processing: {}", raw.name));
        report.push(ingest_one(catalog, &raw, submitter.clone(), uploaded_at));
        progress.inc(1);
    }

    debug!(
        "Batch finished: {} added, {} duplicates, {} failed",
        report.added(),
        report.duplicates(),
        report.failures()
    );

    report
}
