use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for tcas-index operations.
///
/// Variants here are fatal: they abort the operation that raised them.
/// Per-video problems discovered while building an index are not errors in
/// this sense; they are recorded in the build report and the build continues.
#[derive(Debug, Error)]
pub enum TcasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Split file not found: {path}")]
    SplitNotFound { path: PathBuf },

    #[error("Failed to parse annotation JSON from {path}: {source}")]
    AnnotationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse statistics JSON from {path}: {source}")]
    StatisticsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Index build excluded {failed} of {total} video(s)")]
    BuildFailed { failed: usize, total: usize },

    #[error("Statistics drift detected in {fields} field(s)")]
    StatisticsDrift { fields: usize },

    #[error("Cross-split leakage detected for {ids} video id(s)")]
    SplitLeakage { ids: usize },

    #[error("Unknown split: '{0}' (expected: train, val, test)")]
    UnknownSplit(String),

    #[error("Unsupported output format: '{0}' (supported: text, json)")]
    UnsupportedOutput(String),
}
