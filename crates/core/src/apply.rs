use crate::entry::FileEntry;
use crate::planner::{RenameCandidate, RenamePlan};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("invalid new name {name:?} for {}: {reason}", path.display())]
    InvalidName {
        path: PathBuf,
        name: String,
        reason: &'static str,
    },
    #[error("failed to rename {} -> {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Default)]
pub struct ApplyResult {
    pub applied: usize,
    pub unchanged: usize,
    pub failures: Vec<FilesystemError>,
}

impl ApplyResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renames every changed candidate. A failing entry is recorded and the rest
/// are still attempted; nothing is rolled back.
pub fn apply_plan(plan: &RenamePlan) -> ApplyResult {
    let mut result = ApplyResult::default();
    for candidate in &plan.candidates {
        apply_candidate(candidate, &mut result);
    }
    debug!(
        applied = result.applied,
        unchanged = result.unchanged,
        failed = result.failures.len(),
        "applied plan"
    );
    result
}

/// Renames `files[i]` to `names[i]` inside its own directory.
pub fn apply_renames(files: &[FileEntry], names: &[String]) -> ApplyResult {
    let root = files
        .first()
        .and_then(|f| f.path.parent())
        .unwrap_or_else(|| Path::new("."));
    let plan = RenamePlan::from_names(root, files, names.to_vec());
    apply_plan(&plan)
}

fn apply_candidate(candidate: &RenameCandidate, result: &mut ApplyResult) {
    if !candidate.changed {
        result.unchanged += 1;
        return;
    }

    if let Err(reason) = validate_name(&candidate.new_name) {
        warn!(
            path = %candidate.original_path.display(),
            name = %candidate.new_name,
            reason,
            "rejected new name"
        );
        result.failures.push(FilesystemError::InvalidName {
            path: candidate.original_path.clone(),
            name: candidate.new_name.clone(),
            reason,
        });
        return;
    }

    match fs::rename(&candidate.original_path, &candidate.target_path) {
        Ok(()) => {
            debug!(
                from = %candidate.original_path.display(),
                to = %candidate.target_path.display(),
                "renamed"
            );
            result.applied += 1;
        }
        Err(source) => {
            warn!(
                from = %candidate.original_path.display(),
                to = %candidate.target_path.display(),
                error = %source,
                "rename failed"
            );
            result.failures.push(FilesystemError::Rename {
                from: candidate.original_path.clone(),
                to: candidate.target_path.clone(),
                source,
            });
        }
    }
}

fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if name == "." || name == ".." {
        return Err("name is a relative directory reference");
    }
    if name.contains('/') || (cfg!(windows) && name.contains('\\')) {
        return Err("name contains a path separator");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::RenameStats;
    use std::fs;
    use tempfile::tempdir;

    fn candidate(dir: &Path, from: &str, to: &str) -> RenameCandidate {
        RenameCandidate {
            original_path: dir.join(from),
            original_name: from.to_string(),
            new_name: to.to_string(),
            target_path: dir.join(to),
            changed: from != to,
        }
    }

    fn plan(dir: &Path, candidates: Vec<RenameCandidate>) -> RenamePlan {
        RenamePlan {
            root: dir.to_path_buf(),
            candidates,
            stats: RenameStats::default(),
        }
    }

    #[test]
    fn apply_plan_renames_inside_parent_directory() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.txt"), b"A").expect("write a");

        let result = apply_plan(&plan(
            temp.path(),
            vec![candidate(temp.path(), "a.txt", "file_00.txt")],
        ));

        assert!(result.is_success());
        assert_eq!(result.applied, 1);
        assert!(!temp.path().join("a.txt").exists());
        assert_eq!(
            fs::read(temp.path().join("file_00.txt")).expect("read renamed"),
            b"A"
        );
    }

    #[test]
    fn apply_plan_skips_unchanged_candidates() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("same.txt"), b"x").expect("write");

        let result = apply_plan(&plan(
            temp.path(),
            vec![candidate(temp.path(), "same.txt", "same.txt")],
        ));

        assert_eq!(result.applied, 0);
        assert_eq!(result.unchanged, 1);
        assert!(temp.path().join("same.txt").exists());
    }

    #[test]
    fn apply_plan_continues_after_failure() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("b.txt"), b"B").expect("write b");

        let result = apply_plan(&plan(
            temp.path(),
            vec![
                candidate(temp.path(), "missing.txt", "x.txt"),
                candidate(temp.path(), "b.txt", "y.txt"),
            ],
        ));

        assert_eq!(result.applied, 1);
        assert_eq!(result.failures.len(), 1);
        assert!(matches!(
            &result.failures[0],
            FilesystemError::Rename { from, .. } if from == &temp.path().join("missing.txt")
        ));
        assert!(temp.path().join("y.txt").exists());
    }

    #[test]
    fn apply_plan_rejects_names_with_separators() {
        let temp = tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("sub")).expect("create sub");
        fs::write(temp.path().join("a.txt"), b"A").expect("write a");

        let result = apply_plan(&plan(
            temp.path(),
            vec![candidate(temp.path(), "a.txt", "sub/a.txt")],
        ));

        assert_eq!(result.applied, 0);
        assert!(matches!(
            result.failures[0],
            FilesystemError::InvalidName { .. }
        ));
        assert!(temp.path().join("a.txt").exists());
        assert!(!temp.path().join("sub").join("a.txt").exists());
    }

    #[test]
    fn apply_plan_rejects_empty_name() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a"), b"A").expect("write a");

        let result = apply_plan(&plan(temp.path(), vec![candidate(temp.path(), "a", "")]));

        assert_eq!(result.failures.len(), 1);
        assert!(temp.path().join("a").exists());
    }

    #[test]
    fn apply_renames_pairs_files_and_names() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("Column One.csv"), b"1").expect("write");
        fs::write(temp.path().join("Column Two.csv"), b"2").expect("write");
        let files = vec![
            FileEntry::new(temp.path().join("Column One.csv"), "Column One.csv"),
            FileEntry::new(temp.path().join("Column Two.csv"), "Column Two.csv"),
        ];
        let names = vec!["Col One.csv".to_string(), "Col Two.csv".to_string()];

        let result = apply_renames(&files, &names);

        assert_eq!(result.applied, 2);
        assert!(temp.path().join("Col One.csv").exists());
        assert!(temp.path().join("Col Two.csv").exists());
    }
}
