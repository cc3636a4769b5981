use crate::entry::FileEntry;
use crate::sequence::{alphabetic_sequence, numeric_sequence};
use crate::template::{Template, TemplateError, TemplateValues};
use tracing::debug;

/// Expands a parsed [`Template`] once per file.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    template: Template,
    pad: usize,
}

impl NameGenerator {
    pub fn new(template: Template, pad: usize) -> Self {
        Self { template, pad }
    }

    pub fn from_source(source: &str, pad: usize) -> Result<Self, TemplateError> {
        Ok(Self::new(Template::parse(source)?, pad))
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn pad(&self) -> usize {
        self.pad
    }

    /// Expands with the default sequences: `0, 1, 2, ...` and lowercase letters,
    /// or uppercase when `upper` is set.
    pub fn expand(&self, files: &[FileEntry], upper: bool) -> Vec<String> {
        self.expand_with(
            files,
            numeric_sequence(0, 1, files.len()),
            alphabetic_sequence(files.len(), upper),
        )
    }

    /// Pairs each file with the next numeric and alphabetic value. Stops at the
    /// shortest of the three inputs.
    pub fn expand_with<N, A>(&self, files: &[FileEntry], numeric: N, alphabetic: A) -> Vec<String>
    where
        N: IntoIterator<Item = i64>,
        A: IntoIterator<Item = char>,
    {
        let names: Vec<String> = numeric
            .into_iter()
            .zip(alphabetic)
            .zip(files)
            .map(|((n, a), file)| self.expand_one(file, n, a))
            .collect();
        debug!(
            template = self.template.source(),
            files = files.len(),
            names = names.len(),
            "expanded template"
        );
        names
    }

    fn expand_one(&self, file: &FileEntry, numeric: i64, alphabetic: char) -> String {
        let numeric = format!("{:0width$}", numeric, width = self.pad);
        let values = TemplateValues {
            basename: file.stem(),
            numeric: &numeric,
            alphabetic,
        };
        let mut name = self.template.substitute(&values);
        name.push_str(file.extension());
        name
    }
}
