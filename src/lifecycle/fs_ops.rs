//! Filesystem primitives used by the lifecycle steps.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{ReleaseError, Result};

/// Recursively copy `src` to `dst`. `dst` must not exist yet.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| ReleaseError::Io(e.into()))?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Move a directory, creating the destination's parent when needed
pub fn move_dir(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(src, dst)?;
    Ok(())
}

/// Replace the contents of `path` through a temporary file in the same
/// directory, so readers see either the old or the new file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.persist(path).map_err(|e| ReleaseError::Io(e.error))?;
    Ok(())
}
