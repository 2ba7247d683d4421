//! Error types and per-file scan results for the flow generator.

use std::path::{Path, PathBuf};

/// Errors that can occur while generating the dispatch source.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// Filesystem I/O error on a specific path.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A participating file has no usable marker comment.
    #[error("malformed marker comment in {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Two files declare the same job name.
    #[error(
        "duplicate job name '{name}' declared in {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateJob {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// One or more job files failed extraction; nothing was generated.
    #[error("{} job file(s) rejected:{}", .0.len(), list_errors(.0))]
    Rejected(Vec<GenError>),

    /// Template parse or render failure.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Invalid generator configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// `--check` found generated output that differs from a fresh render.
    #[error("generated file {} is out of date", path.display())]
    Stale { path: PathBuf },
}

impl GenError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

fn list_errors(errors: &[GenError]) -> String {
    errors.iter().map(|e| format!("\n  - {e}")).collect()
}

/// Result alias for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Outcome of inspecting a single directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Path to the file that was inspected.
    pub path: PathBuf,
    /// What happened to it.
    pub status: ScanStatus,
}

/// Status of a single directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    /// A job definition was extracted and added to the table.
    Found { job_name: String },
    /// File does not match the job file naming convention.
    Skipped { reason: String },
}
