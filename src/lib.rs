//! tcas-index: indexing and query layer for the TCAS dataset.
//!
//! TCAS is a traffic crash anticipation video dataset: per-video JSON
//! annotations, split files naming the train/val/test partitions, and a
//! persisted statistics file. This crate validates annotations against the
//! dataset's schema, builds an in-memory catalog for one split, and serves
//! read-only queries (by id, by frame, filtered scans, time-to-accident).
//! Video media is never parsed; the crate only computes the paths external
//! decode tooling should use.
//!
//! # Modules
//!
//! - [`model`]: typed annotation records (VideoRecord, FrameRecord, etc.)
//! - [`validation`]: schema validation and error reporting
//! - [`index`]: split scanning and catalog construction
//! - [`query`]: read-only lookups over a built index
//! - [`stats`]: statistics computation and drift detection
//! - [`error`]: error types for tcas-index operations

pub mod error;
pub mod index;
pub mod model;
pub mod query;
pub mod stats;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::TcasError;

use index::SplitName;

/// The tcas-index CLI application.
#[derive(Parser)]
#[command(name = "tcas-index")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Build the index for one split and print the build report.
    Build(BuildArgs),

    /// Validate a single annotation file.
    Validate(ValidateArgs),

    /// Compute statistics for one split.
    Stats(StatsArgs),

    /// Audit train/val/test for cross-split leakage.
    Splits(SplitsArgs),
}

/// Arguments for the build subcommand.
#[derive(clap::Args)]
struct BuildArgs {
    /// Dataset root directory.
    root: PathBuf,

    /// Split to index ('train', 'val', or 'test').
    #[arg(long, default_value = "train")]
    split: String,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Exit non-zero if any video was excluded from the catalog.
    #[arg(long)]
    strict: bool,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Annotation file to validate.
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the stats subcommand.
#[derive(clap::Args)]
struct StatsArgs {
    /// Dataset root directory.
    root: PathBuf,

    /// Split to index ('train', 'val', or 'test').
    #[arg(long, default_value = "train")]
    split: String,

    /// Compare against metadata/statistics.json and fail on drift.
    #[arg(long)]
    check: bool,
}

/// Arguments for the splits subcommand.
#[derive(clap::Args)]
struct SplitsArgs {
    /// Dataset root directory.
    root: PathBuf,
}

/// Run the tcas-index CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), TcasError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Build(args)) => run_build(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Stats(args)) => run_stats(args),
        Some(Commands::Splits(args)) => run_splits(args),
        None => {
            println!("tcas-index {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Indexing and query layer for the TCAS dataset.");
            println!();
            println!("Run 'tcas-index --help' for usage information.");
            Ok(())
        }
    }
}

fn parse_split(s: &str) -> Result<SplitName, TcasError> {
    SplitName::parse(s).ok_or_else(|| TcasError::UnknownSplit(s.to_string()))
}

/// Execute the build subcommand.
fn run_build(args: BuildArgs) -> Result<(), TcasError> {
    let split = parse_split(&args.split)?;
    let index = index::build(&args.root, split)?;
    let report = index.report();

    match args.output.as_str() {
        "json" => {
            // Simple JSON output for programmatic use
            println!("{{");
            println!("  \"split\": \"{}\",", report.split);
            println!("  \"loaded\": {},", report.loaded);
            println!("  \"excluded\": {},", report.failed());
            println!("  \"failures\": [");
            for (i, failure) in report.failures.iter().enumerate() {
                let comma = if i < report.failures.len() - 1 { "," } else { "" };
                println!("    {{");
                println!("      \"video_id\": \"{}\",", failure.video_id);
                println!(
                    "      \"reason\": \"{}\"",
                    failure.reason.to_string().replace('"', "\\\"")
                );
                println!("    }}{}", comma);
            }
            println!("  ]");
            println!("}}");
        }
        "text" => {
            print!("{}", report);
        }
        other => return Err(TcasError::UnsupportedOutput(other.to_string())),
    }

    if args.strict && !report.is_complete() {
        Err(TcasError::BuildFailed {
            failed: report.failed(),
            total: report.total(),
        })
    } else {
        Ok(())
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), TcasError> {
    let raw = model::raw::read_annotation(&args.input)?;

    // Warnings are reported even when the annotation is otherwise valid.
    let (_, report) = validation::check_annotation(&raw);

    match args.output.as_str() {
        "json" => {
            println!("{{");
            println!("  \"error_count\": {},", report.error_count());
            println!("  \"warning_count\": {},", report.warning_count());
            println!("  \"issues\": [");
            for (i, issue) in report.issues.iter().enumerate() {
                let comma = if i < report.issues.len() - 1 { "," } else { "" };
                println!("    {{");
                println!("      \"severity\": \"{:?}\",", issue.severity);
                println!("      \"code\": \"{:?}\",", issue.code);
                println!(
                    "      \"message\": \"{}\",",
                    issue.message.replace('"', "\\\"")
                );
                println!("      \"context\": \"{}\"", issue.context);
                println!("    }}{}", comma);
            }
            println!("  ]");
            println!("}}");
        }
        "text" => {
            print!("{}", report);
        }
        other => return Err(TcasError::UnsupportedOutput(other.to_string())),
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(TcasError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the stats subcommand.
fn run_stats(args: StatsArgs) -> Result<(), TcasError> {
    let split = parse_split(&args.split)?;
    let index = index::build(&args.root, split)?;
    let computed = stats::compute_statistics(&index);

    print!("{}", computed);

    if args.check {
        let persisted = stats::read_statistics(&stats::statistics_path(&args.root))?;
        let drift = stats::diff_statistics(&computed, &persisted);

        println!();
        print!("{}", drift);

        if !drift.is_in_sync() {
            return Err(TcasError::StatisticsDrift {
                fields: drift.len(),
            });
        }
    }

    Ok(())
}

/// Execute the splits subcommand.
fn run_splits(args: SplitsArgs) -> Result<(), TcasError> {
    let audit = index::audit_splits(&args.root)?;
    print!("{}", audit);

    if audit.is_disjoint() {
        Ok(())
    } else {
        Err(TcasError::SplitLeakage {
            ids: audit.overlaps.len(),
        })
    }
}
