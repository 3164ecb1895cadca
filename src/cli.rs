//! Command-line interface: argument parsing and the session runner.

use crate::config::IntakeConfig;
use crate::constants::report;
use crate::datasets::DatasetOverview;
use crate::error::IntakeError;
use crate::history::{export_csv, summary_frame};
use crate::ingest::{FileOutcome, IngestReport};
use crate::models::{RawFile, Submitter};
use crate::session::Session;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::iter;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "intake")]
#[command(about = "Ingest sustainability data files and report on what was collected")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Files to upload manually, in order
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Input directory scanned for new files (default: ./input)
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Author recorded for the manual uploads
    #[arg(short, long)]
    pub author: Option<String>,

    /// Organizational unit recorded for the manual uploads
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Do not write demo files into a missing input directory
    #[arg(long)]
    pub no_seed: bool,

    /// Skip the input directory scan
    #[arg(long)]
    pub no_scan: bool,

    /// Write the history table to this CSV file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Print the per-dataset overview
    #[arg(long)]
    pub datasets: bool,

    /// Print the available report options
    #[arg(long)]
    pub report_options: bool,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logs and progress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Configuration file (or defaults) with the command-line overrides applied
    pub fn build_config(&self) -> crate::Result<IntakeConfig> {
        let mut config = match &self.config {
            Some(path) => IntakeConfig::from_file(path)?,
            None => IntakeConfig::default(),
        };

        if let Some(input) = &self.input {
            config = config.with_input_dir(input);
        }
        if self.no_seed {
            config = config.without_seeding();
        }
        if self.no_scan {
            config = config.without_scan();
        }

        config.validate()?;
        Ok(config)
    }

    fn submitter(&self) -> Submitter {
        Submitter::new(self.author.clone(), self.unit.clone())
    }
}

/// Run one intake session
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    let config = args
        .build_config()
        .context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let mut session = Session::new(config);

    if !args.files.is_empty() {
        let report = upload_files(&mut session, &args);
        print_outcomes(&report, true);
    }

    if session.config().scan_input_dir {
        let input_dir = session.config().input_dir.clone();
        let report = session.scan_input().with_context(|| {
            format!("Failed to scan input directory {}", input_dir.display())
        })?;
        print_outcomes(&report, false);
    }

    let rows = session.history();
    println!();
    if rows.is_empty() {
        println!("{}", "No files have been catalogued yet.".bright_black());
    } else {
        println!("{}", "Upload history".bright_green().bold());
        let table = summary_frame(&rows).context("Failed to build the history table")?;
        println!("{}", table);
    }

    if args.datasets {
        print_overview(&session.overview());
    }

    if args.report_options {
        print_report_options();
    }

    if let Some(path) = &args.export {
        export_csv(&rows, path)
            .with_context(|| format!("Failed to export history to {}", path.display()))?;
        info!("Exported {} history rows to {}", rows.len(), path.display());
        println!("History written to {}", path.display().to_string().bright_cyan());
    }

    Ok(())
}

/// Read and ingest the manual uploads; unreadable paths become failures in place
fn upload_files(session: &mut Session, args: &Args) -> IngestReport {
    let submitter = args.submitter();
    let progress = if args.files.len() > 1 && !args.quiet {
        let pb = ProgressBar::new(args.files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut report = IngestReport::new();
    for path in &args.files {
        match RawFile::read(path) {
            Ok(raw) => {
                report.append(session.upload_with_progress(
                    iter::once(raw),
                    &submitter,
                    &progress,
                ));
            }
            Err(error) => {
                progress.inc(1);
                report.push(FileOutcome::Failed {
                    filename: path.display().to_string(),
                    error,
                });
            }
        }
    }

    progress.finish_and_clear();
    report
}

fn print_outcomes(report: &IngestReport, show_duplicates: bool) {
    for outcome in report.outcomes() {
        match outcome {
            FileOutcome::Added { filename, category } => {
                println!(
                    "{} '{}' processed as {}",
                    "✓".bright_green(),
                    filename,
                    category.to_string().bright_cyan()
                );
            }
            FileOutcome::Duplicate { filename } if show_duplicates => {
                println!(
                    "{} '{}' is already catalogued, skipped",
                    "•".bright_yellow(),
                    filename
                );
            }
            FileOutcome::Duplicate { .. } => {}
            FileOutcome::Failed { filename, error } => {
                println!(
                    "{} could not process '{}': {}",
                    "✗".bright_red(),
                    filename,
                    failure_reason(error)
                );
            }
        }
    }
}

fn failure_reason(error: &IntakeError) -> String {
    match error {
        IntakeError::Decode { format, source, .. } => format!("invalid {} ({})", format, source),
        IntakeError::Unreadable { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

fn print_overview(overview: &[DatasetOverview]) {
    println!();
    println!("{}", "Datasets".bright_green().bold());

    for dataset in overview {
        println!();
        println!(
            "{} ({} files)",
            dataset.name.bright_cyan().bold(),
            dataset.file_count
        );
        if !dataset.description.is_empty() {
            println!("  {}", dataset.description);
        }
        if let Some(date) = dataset.last_updated {
            println!("  {} {}", "last updated:".bright_black(), date);
        }
        for (name, definition) in &dataset.reference_variables {
            println!("  - {}: {}", name.bright_white(), definition);
        }
        if !dataset.detected_variables.is_empty() {
            println!(
                "  {} {}",
                "detected:".bright_black(),
                dataset.detected_variables.join(", ")
            );
        }
    }
}

fn print_report_options() {
    println!();
    println!("{}", "Report options".bright_green().bold());

    let groups = [
        ("Audiences", report::AUDIENCES),
        ("Components", report::COMPONENTS),
        ("Output formats", report::OUTPUT_FORMATS),
        ("Styles", report::STYLES),
        ("Template sections", report::TEMPLATE_SECTIONS),
    ];
    for (title, options) in groups {
        println!("  {} {}", format!("{}:", title).bright_white(), options.join(", "));
    }
    println!(
        "  {} {}",
        "Default component:".bright_white(),
        report::DEFAULT_COMPONENT
    );
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sustainability_intake={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
