//! Configuration management and validation.
//!
//! Provides the session configuration: where the input directory lives,
//! whether it is seeded with demo data, and the placeholder texts used by
//! the history report. Values can be loaded from a JSON file and then
//! overridden programmatically or from the command line.

use crate::constants::{DEFAULT_INPUT_DIR, UNKNOWN_AUTHOR, UNSPECIFIED_UNIT};
use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for one intake session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Directory scanned for files on every session
    pub input_dir: PathBuf,

    /// Write demo files when the input directory does not exist yet
    pub seed_examples: bool,

    /// Scan the input directory after manual uploads
    pub scan_input_dir: bool,

    /// Author shown for records without one
    pub unknown_author: String,

    /// Unit shown for records without one
    pub unspecified_unit: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            seed_examples: true,
            scan_input_dir: true,
            unknown_author: UNKNOWN_AUTHOR.to_string(),
            unspecified_unit: UNSPECIFIED_UNIT.to_string(),
        }
    }
}

impl IntakeConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            IntakeError::configuration(format!("invalid config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Set the input directory
    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    /// Never write demo files
    pub fn without_seeding(mut self) -> Self {
        self.seed_examples = false;
        self
    }

    /// Skip the directory scan
    pub fn without_scan(mut self) -> Self {
        self.scan_input_dir = false;
        self
    }

    /// Check values that would make a session unusable
    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(IntakeError::configuration("input_dir must not be empty"));
        }
        if self.unknown_author.trim().is_empty() || self.unspecified_unit.trim().is_empty() {
            return Err(IntakeError::configuration(
                "placeholder texts for author and unit must not be blank",
            ));
        }
        Ok(())
    }
}
