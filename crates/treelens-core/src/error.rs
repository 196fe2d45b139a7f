/// Error taxonomy for a run.
///
/// Only [`ConfigError`] and [`MergeError`] can change a run's outcome; the
/// rest are recovered per analyser and surface as diagnostics.
use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable run configuration. Fatal before any tree is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no output path configured")]
    MissingOutput,

    #[error("no analysers requested")]
    NoAnalysers,

    #[error("max depth must be at least 1, got {0}")]
    InvalidMaxDepth(u32),

    #[error("worker count must be at least 1")]
    InvalidWorkers,

    #[error("root path #{0} is empty")]
    EmptyRoot(usize),

    #[error("ignore pattern {pattern:?} is invalid: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

/// An analyser could not be constructed from the forest and paths.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("constructor panicked: {0}")]
    Panicked(String),
}

/// An analyser's computation failed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("the forest contains no trees")]
    EmptyForest,

    #[error("{0}")]
    Failed(String),

    #[error("analysis panicked: {0}")]
    Panicked(String),
}

/// Rendering one analyser's results into an artifact failed.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report requested before analysis completed")]
    NotAnalysed,

    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialisation failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("artifact from {analyser} is {found:?}, expected {expected:?}")]
    FormatMismatch {
        analyser: String,
        expected: crate::report::ReportFormat,
        found: crate::report::ReportFormat,
    },

    #[error("{0}")]
    Failed(String),

    #[error("report generation panicked: {0}")]
    Panicked(String),
}

/// The merged report could not be assembled or persisted.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("merging {count} artifacts failed: {source}")]
    Merge {
        count: usize,
        #[source]
        source: ReportError,
    },

    #[error("writing merged report to {sink} failed: {source}")]
    Write {
        sink: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures that abort a run or leave it without a delivered report.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Delivery(#[from] MergeError),
}

/// Render a caught panic payload as text.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
