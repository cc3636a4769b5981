use crate::entry::FileEntry;
use regex::{NoExpand, Regex, RegexBuilder};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("replacement {replacement:?} refers to group {group:?}, which the pattern does not define (write $$ for a literal $)")]
    UnknownGroup { replacement: String, group: String },
}

#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    pub old: String,
    pub new: String,
    pub match_case: bool,
    /// Maximum replacements per name; 0 replaces every match.
    pub count: usize,
    pub literal: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            old: String::new(),
            new: String::new(),
            match_case: true,
            count: 1,
            literal: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Replacer {
    pattern: Regex,
    replacement: String,
    count: usize,
    literal: bool,
}

impl Replacer {
    pub fn new(options: &ReplaceOptions) -> Result<Self, PatternError> {
        let source = if options.literal {
            regex::escape(&options.old)
        } else {
            options.old.clone()
        };
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(!options.match_case)
            .build()
            .map_err(|source| PatternError::InvalidRegex {
                pattern: options.old.clone(),
                source,
            })?;

        if !options.literal {
            if let Some(group) = missing_group_reference(&pattern, &options.new) {
                return Err(PatternError::UnknownGroup {
                    replacement: options.new.clone(),
                    group,
                });
            }
        }

        Ok(Self {
            pattern,
            replacement: options.new.clone(),
            count: options.count,
            literal: options.literal,
        })
    }

    pub fn apply(&self, name: &str) -> String {
        if self.literal {
            self.pattern
                .replacen(name, self.count, NoExpand(&self.replacement))
                .into_owned()
        } else {
            self.pattern
                .replacen(name, self.count, self.replacement.as_str())
                .into_owned()
        }
    }

    pub fn apply_all(&self, files: &[FileEntry]) -> Vec<String> {
        let names: Vec<String> = files.iter().map(|file| self.apply(&file.name)).collect();
        debug!(
            pattern = self.pattern.as_str(),
            files = files.len(),
            changed = files
                .iter()
                .zip(&names)
                .filter(|(file, name)| file.name != **name)
                .count(),
            "applied replacement"
        );
        names
    }
}

/// First `$N`, `$name` or `${name}` in `replacement` that names no group of
/// `pattern`. `$$` is an escaped dollar and a `$` not followed by a name is literal.
fn missing_group_reference(pattern: &Regex, replacement: &str) -> Option<String> {
    let mut i = 0;
    while let Some(offset) = replacement[i..].find('$') {
        let at = i + offset;
        let rest = &replacement[at + 1..];
        if rest.starts_with('$') {
            i = at + 2;
            continue;
        }

        let (name, consumed) = if let Some(braced) = rest.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => {
                    i = at + 1;
                    continue;
                }
            }
        } else {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            if end == 0 {
                i = at + 1;
                continue;
            }
            (&rest[..end], end)
        };

        if !group_exists(pattern, name) {
            return Some(name.to_string());
        }
        i = at + 1 + consumed;
    }
    None
}

fn group_exists(pattern: &Regex, name: &str) -> bool {
    match name.parse::<usize>() {
        Ok(index) => index < pattern.captures_len(),
        Err(_) => pattern.capture_names().flatten().any(|n| n == name),
    }
}
