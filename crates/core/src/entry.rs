use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_string();
        Some(Self::new(path, name))
    }

    /// Name without its extension.
    pub fn stem(&self) -> &str {
        split_extension(&self.name).0
    }

    /// Extension including the leading dot, or an empty string.
    pub fn extension(&self) -> &str {
        split_extension(&self.name).1
    }
}

/// Splits at the last dot. Leading dots belong to the stem, so `.bashrc` has no
/// extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    let Some(dot) = name.rfind('.') else {
        return (name, "");
    };
    if name[..dot].chars().all(|c| c == '.') {
        return (name, "");
    }
    name.split_at(dot)
}
