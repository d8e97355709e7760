//! Default file copy.

use crate::error::{FieldcopyError, Result};
use crate::fs::atomic_copy;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Join a rendered file name onto a root, keeping it under that root.
///
/// A leading root or drive prefix in `name` is dropped, so `/x/y.png`
/// becomes `root/x/y.png` instead of replacing `root`.
pub fn rooted(root: &Path, name: &str) -> PathBuf {
    let relative: PathBuf = Path::new(name)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(relative)
}

/// Copy `source_path/source_name` to `destination_path/destination_name`.
///
/// Both roots and both names must be non-empty, and the source must be a
/// regular file. Missing destination directories are created and the
/// destination is written atomically, replacing any existing file.
pub fn default_copy_file(
    source_path: &Path,
    source_name: &str,
    destination_path: &Path,
    destination_name: &str,
) -> Result<()> {
    if source_path.as_os_str().is_empty() || destination_path.as_os_str().is_empty() {
        return Err(FieldcopyError::CopyError(
            "source and destination paths are required".to_string(),
        ));
    }
    if source_name.is_empty() || destination_name.is_empty() {
        return Err(FieldcopyError::CopyError(
            "source and destination file names are required".to_string(),
        ));
    }

    let source = rooted(source_path, source_name);
    let destination = rooted(destination_path, destination_name);

    let metadata = fs::metadata(&source).map_err(|e| {
        FieldcopyError::CopyError(format!("cannot stat '{}': {}", source.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(FieldcopyError::CopyError(format!(
            "{} is not a regular file",
            source_name
        )));
    }

    let bytes = atomic_copy(&source, &destination)?;

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        bytes,
        "copied file"
    );
    Ok(())
}
