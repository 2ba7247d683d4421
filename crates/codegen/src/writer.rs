//! Atomic replacement of the generated file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{GenError, Result};

/// What the writer did with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Destination was created or replaced.
    Written,
    /// Destination already held identical content; left untouched.
    Unchanged,
}

/// Replace `path` with `contents`.
///
/// Writes to a `.<name>.tmp` file beside the destination first, then renames
/// it over the destination, so a failure never leaves a truncated file.
/// Identical content is not rewritten, which keeps the mtime stable for Cargo.
pub fn write_atomic(path: &Path, contents: &str) -> Result<WriteOutcome> {
    if is_current(path, contents)? {
        debug!(path = %path.display(), "generated file unchanged");
        return Ok(WriteOutcome::Unchanged);
    }

    let tmp_path = tmp_path_for(path)?;

    if let Err(e) = fs::write(&tmp_path, contents) {
        remove_tmp(&tmp_path);
        return Err(GenError::io(&tmp_path, e));
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        remove_tmp(&tmp_path);
        return Err(GenError::io(path, e));
    }

    info!(path = %path.display(), bytes = contents.len(), "wrote generated file");
    Ok(WriteOutcome::Written)
}

/// Whether `path` exists and holds exactly `contents`.
pub fn is_current(path: &Path, contents: &str) -> Result<bool> {
    match fs::read(path) {
        Ok(existing) => Ok(existing == contents.as_bytes()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GenError::io(path, e)),
    }
}

fn tmp_path_for(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| GenError::Config(format!("output path {} has no file name", path.display())))?;
    Ok(path.with_file_name(format!(".{name}.tmp")))
}

fn remove_tmp(tmp_path: &Path) {
    if let Err(e) = fs::remove_file(tmp_path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %tmp_path.display(), error = %e, "failed to remove temporary file");
        }
    }
}
