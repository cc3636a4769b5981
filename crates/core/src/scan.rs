use crate::entry::FileEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("path does not exist: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to read directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Lists the regular files directly inside `root` (following symlinks), sorted by
/// name. Directories, broken links and special files are skipped.
pub fn scan_directory(root: &Path) -> Result<Vec<FileEntry>, ScanError> {
    if !root.exists() {
        return Err(ScanError::InvalidPath(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ScanError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            skipped += 1;
            continue;
        }
        if let Some(file) = FileEntry::from_path(path) {
            out.push(file);
        }
    }

    debug!(
        root = %root.display(),
        files = out.len(),
        skipped,
        "scanned directory"
    );
    Ok(out)
}
