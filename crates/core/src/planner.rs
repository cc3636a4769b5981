use crate::entry::FileEntry;
use crate::generator::NameGenerator;
use crate::replace::{ReplaceOptions, Replacer};
use crate::scan::scan_directory;
use crate::sequence::{alphabetic_sequence, numeric_sequence, NumericSequence};
use crate::template::{Template, DEFAULT_DELIMITER};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct TemplatePlanOptions {
    pub input: PathBuf,
    pub template: String,
    pub delimiter: char,
    pub start: i64,
    pub step: i64,
    pub pad: usize,
    pub upper: bool,
}

impl Default for TemplatePlanOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            template: String::new(),
            delimiter: DEFAULT_DELIMITER,
            start: 0,
            step: 1,
            pad: 0,
            upper: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplacePlanOptions {
    pub input: PathBuf,
    pub replace: ReplaceOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameCandidate {
    pub original_path: PathBuf,
    pub original_name: String,
    pub new_name: String,
    pub target_path: PathBuf,
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenameStats {
    pub scanned_files: usize,
    pub planned: usize,
    pub unchanged: usize,
    /// Files left without a name because a sequence ran out first.
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub root: PathBuf,
    pub candidates: Vec<RenameCandidate>,
    pub stats: RenameStats,
}

impl RenamePlan {
    /// Pairs files with names by position. Extra files are counted as dropped.
    pub fn from_names(root: &Path, files: &[FileEntry], names: Vec<String>) -> Self {
        let mut stats = RenameStats {
            scanned_files: files.len(),
            ..RenameStats::default()
        };

        let candidates: Vec<RenameCandidate> = files
            .iter()
            .zip(names)
            .map(|(file, new_name)| {
                let parent = file.path.parent().unwrap_or(root);
                let target_path = parent.join(&new_name);
                let changed = new_name != file.name;
                if !changed {
                    stats.unchanged += 1;
                }
                RenameCandidate {
                    original_path: file.path.clone(),
                    original_name: file.name.clone(),
                    new_name,
                    target_path,
                    changed,
                }
            })
            .collect();

        stats.planned = candidates.len();
        stats.dropped = files.len().saturating_sub(candidates.len());
        if stats.dropped > 0 {
            warn!(
                dropped = stats.dropped,
                "some files received no new name and will be left as they are"
            );
        }

        Self {
            root: root.to_path_buf(),
            candidates,
            stats,
        }
    }

    pub fn changed(&self) -> impl Iterator<Item = &RenameCandidate> {
        self.candidates.iter().filter(|c| c.changed)
    }
}

pub fn generate_template_plan(options: &TemplatePlanOptions) -> Result<RenamePlan> {
    let template = Template::with_delimiter(&options.template, options.delimiter)
        .with_context(|| format!("invalid template: {:?}", options.template))?;
    let generator = NameGenerator::new(template, options.pad);

    let files = scan_directory(&options.input)?;
    debug!(
        start = options.start,
        step = options.step,
        stop = NumericSequence::stop_bound(options.start, options.step, files.len()),
        "numeric sequence"
    );
    let names = generator.expand_with(
        &files,
        numeric_sequence(options.start, options.step, files.len()),
        alphabetic_sequence(files.len(), options.upper),
    );

    Ok(RenamePlan::from_names(&options.input, &files, names))
}

pub fn generate_replace_plan(options: &ReplacePlanOptions) -> Result<RenamePlan> {
    let replacer = Replacer::new(&options.replace)?;
    let files = scan_directory(&options.input)?;
    let names = replacer.apply_all(&files);
    Ok(RenamePlan::from_names(&options.input, &files, names))
}
