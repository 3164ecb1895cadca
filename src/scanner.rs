//! Input directory scanning and demo seeding
//!
//! The scan lists the regular files directly inside the input directory and
//! feeds every name the catalog does not know yet through the ingestion
//! pipeline. One unreadable or malformed file never stops the scan.

use crate::catalog::Catalog;
use crate::constants::seed;
use crate::error::{IntakeError, Result};
use crate::ingest::{FileOutcome, IngestReport, ingest_one};
use crate::models::{RawFile, Submitter};
use chrono::Local;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Catalog every not-yet-known file in `directory` (non-recursive)
pub fn scan(directory: &Path, catalog: &mut Catalog) -> Result<IngestReport> {
    if !directory.is_dir() {
        return Err(IntakeError::InputDirectory {
            path: directory.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    debug!("Scanning input directory: {}", directory.display());

    let uploaded_at = Local::now().date_naive();
    let mut report = IngestReport::new();

    let entries = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                let filename = error
                    .path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| directory.display().to_string());
                warn!("Could not list '{}': {}", filename, error);
                report.push(FileOutcome::Failed {
                    filename,
                    error: error.into(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            debug!("Skipping non-file entry: {}", entry.path().display());
            continue;
        }

        let filename = entry.file_name().to_string_lossy().into_owned();
        if catalog.contains(&filename) {
            debug!("Already catalogued, skipping: {}", filename);
            report.push(FileOutcome::Duplicate { filename });
            continue;
        }

        // The file may vanish between listing and reading
        let outcome = match RawFile::read(entry.path()) {
            Ok(raw) => ingest_one(catalog, &raw, Submitter::anonymous(), uploaded_at),
            Err(error) => {
                warn!("Could not read '{}': {}", filename, error);
                FileOutcome::Failed { filename, error }
            }
        };
        report.push(outcome);
    }

    debug!(
        "Scan of {} finished: {} added, {} already known, {} failed",
        directory.display(),
        report.added(),
        report.duplicates(),
        report.failures()
    );

    Ok(report)
}

/// Create the input directory with demo data if it does not exist yet.
///
/// Returns whether the directory was created.
pub fn ensure_input_dir(directory: &Path) -> Result<bool> {
    if directory.exists() {
        return Ok(false);
    }

    create_seeded(directory, write_seed_files)?;
    info!(
        "Created input directory {} with example data",
        directory.display()
    );

    Ok(true)
}

/// Create `directory` and run `populate` in it; on failure the directory is removed
fn create_seeded<F>(directory: &Path, populate: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    std::fs::create_dir_all(directory).map_err(|source| IntakeError::InputDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    if let Err(error) = populate(directory) {
        // Never leave a partially seeded directory behind
        warn!("Seeding {} failed, removing it: {}", directory.display(), error);
        if let Err(cleanup) = std::fs::remove_dir_all(directory) {
            warn!("Could not remove {}: {}", directory.display(), cleanup);
        }
        return Err(error);
    }

    Ok(())
}

/// Write the two demo CSV files into `directory`
pub fn write_seed_files(directory: &Path) -> Result<()> {
    let mut environmental = df!(
        "fecha_reporte" => ["2025-03-01", "2025-03-15"],
        "consumo_hidrico_m3" => [12345i64, 11320],
        "emisiones_co2_ton" => [350i64, 340],
        "area" => ["Ambiental", "Ambiental"]
    )?;

    let mut social = df!(
        "fecha" => ["2025-03-10", "2025-04-01"],
        "actividad" => ["Reunión con junta de vecinos", "Entrega de informe de avance"],
        "participantes" => [20i64, 35],
        "area" => ["Comunicaciones", "Comunicaciones"]
    )?;

    write_csv(&mut environmental, &directory.join(seed::ENVIRONMENTAL_FILE))?;
    write_csv(&mut social, &directory.join(seed::SOCIAL_FILE))?;

    Ok(())
}

/// Write a table as CSV with a header row
pub fn write_csv(table: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(table)?;

    debug!("Wrote {} rows to {}", table.height(), path.display());
    Ok(())
}
