mod apply;
mod config;
mod entry;
mod generator;
mod planner;
mod replace;
mod scan;
mod sequence;
mod template;

pub use apply::{apply_plan, apply_renames, ApplyResult, FilesystemError};
pub use config::{
    app_paths, load_config, load_config_from, save_config, save_config_to, AppConfig, AppPaths,
};
pub use entry::{split_extension, FileEntry};
pub use generator::NameGenerator;
pub use planner::{
    generate_replace_plan, generate_template_plan, RenameCandidate, RenamePlan, RenameStats,
    ReplacePlanOptions, TemplatePlanOptions,
};
pub use replace::{PatternError, ReplaceOptions, Replacer};
pub use scan::{scan_directory, ScanError};
pub use sequence::{alphabetic_sequence, numeric_sequence, AlphabeticSequence, NumericSequence};
pub use template::{
    Key, Template, TemplateError, TemplatePart, TemplateValues, DEFAULT_DELIMITER,
};
