//! Non-recursive listing of the job definitions directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GenError, Result};

/// List the regular files directly inside `dir`, sorted by file name.
///
/// Subdirectories are skipped. A missing or unreadable directory is fatal.
pub fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    // walkdir yields a file root at depth 0, which min_depth(1) would drop silently
    let meta = fs::metadata(dir).map_err(|e| GenError::io(dir, e))?;
    if !meta.is_dir() {
        return Err(GenError::io(dir, std::io::Error::other("not a directory")));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            GenError::Io { path, source }
        })?;

        if entry.file_type().is_dir() {
            debug!(path = %entry.path().display(), "skipping subdirectory");
            continue;
        }
        files.push(entry.into_path());
    }

    debug!(path = %dir.display(), count = files.len(), "scanned jobs directory");
    Ok(files)
}
