//! An intake session: one catalog plus the configuration that drives it.
//!
//! Sessions share nothing. Manual uploads and the directory scan both feed
//! the session's own catalog, so a name seen by either is skipped by both.

use crate::catalog::Catalog;
use crate::config::IntakeConfig;
use crate::datasets::{DatasetOverview, overview};
use crate::error::Result;
use crate::history::{SummaryRow, summarize_with};
use crate::ingest::{IngestReport, ingest_files_with_progress, process_file};
use crate::models::{RawFile, Submitter, UploadRecord};
use crate::scanner::{ensure_input_dir, scan};
use chrono::Local;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Session {
    config: IntakeConfig,
    catalog: Catalog,
}

impl Session {
    /// Start a session with an empty catalog
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            config,
            catalog: Catalog::new(),
        }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Manual upload path
    pub fn upload<I>(&mut self, files: I, submitter: &Submitter) -> IngestReport
    where
        I: IntoIterator<Item = RawFile>,
    {
        self.upload_with_progress(files, submitter, &ProgressBar::hidden())
    }

    pub fn upload_with_progress<I>(
        &mut self,
        files: I,
        submitter: &Submitter,
        progress: &ProgressBar,
    ) -> IngestReport
    where
        I: IntoIterator<Item = RawFile>,
    {
        ingest_files_with_progress(&mut self.catalog, files, submitter, progress)
    }

    /// Replace a catalogued file with a new version, or add it if unknown.
    ///
    /// Returns the superseded record.
    pub fn replace(
        &mut self,
        raw: &RawFile,
        submitter: Submitter,
    ) -> Result<Option<UploadRecord>> {
        let record = process_file(raw, submitter, Local::now().date_naive())?;
        let previous = self.catalog.replace(record);
        if previous.is_some() {
            info!("Replaced '{}' with a new version", raw.name);
        }
        Ok(previous)
    }

    /// Seed (if enabled and needed) and scan the input directory
    pub fn scan_input(&mut self) -> Result<IngestReport> {
        let input_dir = self.config.input_dir.clone();

        if self.config.seed_examples && ensure_input_dir(&input_dir)? {
            debug!("Seeded example data into {}", input_dir.display());
        }

        if !input_dir.is_dir() {
            warn!(
                "Input directory {} does not exist, nothing to scan",
                input_dir.display()
            );
            return Ok(IngestReport::new());
        }

        scan(&input_dir, &mut self.catalog)
    }

    /// History table rows using the configured placeholders
    pub fn history(&self) -> Vec<SummaryRow> {
        summarize_with(
            &self.catalog,
            &self.config.unknown_author,
            &self.config.unspecified_unit,
        )
    }

    pub fn overview(&self) -> Vec<DatasetOverview> {
        overview(&self.catalog)
    }
}
