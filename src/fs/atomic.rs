//! Atomic file writes.
//!
//! Destination files are written to a temporary sibling (`.{filename}.tmp`),
//! synced to disk, and then renamed over the target. A reader never observes
//! a half-copied file, and an interrupted copy leaves the previous
//! destination in place.
//!
//! The rename is only atomic when the temporary file and the target live on
//! the same filesystem, which is why the temporary file is created in the
//! target's own directory.

use crate::error::{FieldcopyError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use fieldcopy::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("out/images/559.png"), b"...")?;
/// # Ok::<(), fieldcopy::error::FieldcopyError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    replace_with(path.as_ref(), |file| file.write_all(content))
}

/// Atomically copy `source` to `destination`, streaming the contents.
///
/// Returns the number of bytes copied.
pub fn atomic_copy<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<u64> {
    let source = source.as_ref();
    let mut reader = File::open(source).map_err(|e| {
        FieldcopyError::CopyError(format!("failed to read '{}': {}", source.display(), e))
    })?;

    replace_with(destination.as_ref(), |file| io::copy(&mut reader, file))
}

/// Fill a temporary sibling of `path` with `write`, then rename it over `path`.
fn replace_with<T>(path: &Path, write: impl FnOnce(&mut File) -> io::Result<T>) -> Result<T> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            FieldcopyError::CopyError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = generate_temp_path(path)?;
    let written = write_and_sync(&temp_path, write)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FieldcopyError::CopyError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(written)
}

fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            FieldcopyError::CopyError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync<T>(path: &Path, write: impl FnOnce(&mut File) -> io::Result<T>) -> Result<T> {
    let mut file = File::create(path).map_err(|e| {
        FieldcopyError::CopyError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    write(&mut file)
        .and_then(|written| file.sync_all().map(|()| written))
        .map_err(|e| {
            let _ = fs::remove_file(path);
            FieldcopyError::CopyError(format!(
                "failed to write temporary file '{}': {}",
                path.display(),
                e
            ))
        })
}
