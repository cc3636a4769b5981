use thiserror::Error;

pub const DEFAULT_DELIMITER: char = '%';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Numeric,
    Alphabetic,
    Basename,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(Key),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("invalid placeholder in template: line {line}, col {column}")]
    InvalidPlaceholder { line: usize, column: usize },
    #[error("unknown placeholder key: {0}")]
    UnknownKey(String),
    #[error("delimiter cannot be an identifier character or brace: {0:?}")]
    InvalidDelimiter(char),
}

/// Values substituted for one file.
#[derive(Debug, Clone, Copy)]
pub struct TemplateValues<'a> {
    pub basename: &'a str,
    pub numeric: &'a str,
    pub alphabetic: char,
}

/// A parsed template. `%%` is a literal `%`, `%n` and `%{n}` are placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    delimiter: char,
    parts: Vec<TemplatePart>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Self::with_delimiter(source, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(source: &str, delimiter: char) -> Result<Self, TemplateError> {
        if is_ident_char(delimiter) || delimiter == '{' || delimiter == '}' {
            return Err(TemplateError::InvalidDelimiter(delimiter));
        }
        let parts = parse_parts(source, delimiter)?;
        Ok(Self {
            source: source.to_string(),
            delimiter,
            parts,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn uses(&self, key: Key) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, TemplatePart::Placeholder(k) if *k == key))
    }

    pub fn substitute(&self, values: &TemplateValues<'_>) -> String {
        let mut output = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                TemplatePart::Literal(s) => output.push_str(s),
                TemplatePart::Placeholder(Key::Basename) => output.push_str(values.basename),
                TemplatePart::Placeholder(Key::Numeric) => output.push_str(values.numeric),
                TemplatePart::Placeholder(Key::Alphabetic) => output.push(values.alphabetic),
            }
        }
        output
    }
}

fn parse_parts(source: &str, delimiter: char) -> Result<Vec<TemplatePart>, TemplateError> {
    let chars: Vec<char> = source.chars().collect();
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch != delimiter {
            literal.push(ch);
            i += 1;
            continue;
        }

        let start = i;
        match chars.get(i + 1) {
            Some(&next) if next == delimiter => {
                literal.push(delimiter);
                i += 2;
            }
            Some('{') => {
                let ident_end = scan_ident(&chars, i + 2);
                if ident_end == i + 2 || chars.get(ident_end) != Some(&'}') {
                    return Err(invalid_at(&chars, start));
                }
                let ident: String = chars[i + 2..ident_end].iter().collect();
                push_placeholder(&mut parts, &mut literal, &ident)?;
                i = ident_end + 1;
            }
            Some(&next) if is_ident_start(next) => {
                let ident_end = scan_ident(&chars, i + 1);
                let ident: String = chars[i + 1..ident_end].iter().collect();
                push_placeholder(&mut parts, &mut literal, &ident)?;
                i = ident_end;
            }
            _ => return Err(invalid_at(&chars, start)),
        }
    }

    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }

    Ok(parts)
}

fn push_placeholder(
    parts: &mut Vec<TemplatePart>,
    literal: &mut String,
    ident: &str,
) -> Result<(), TemplateError> {
    let key = parse_key(ident)?;
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(std::mem::take(literal)));
    }
    parts.push(TemplatePart::Placeholder(key));
    Ok(())
}

fn parse_key(ident: &str) -> Result<Key, TemplateError> {
    match ident {
        "n" => Ok(Key::Numeric),
        "a" => Ok(Key::Alphabetic),
        "d" => Ok(Key::Basename),
        other => Err(TemplateError::UnknownKey(other.to_string())),
    }
}

fn scan_ident(chars: &[char], from: usize) -> usize {
    match chars.get(from) {
        Some(&c) if is_ident_start(c) => {}
        _ => return from,
    }
    let mut end = from + 1;
    while chars.get(end).is_some_and(|&c| is_ident_char(c)) {
        end += 1;
    }
    end
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn invalid_at(chars: &[char], index: usize) -> TemplateError {
    let before = &chars[..index];
    let line = before.iter().filter(|&&c| c == '\n').count() + 1;
    let column = index - before.iter().rposition(|&c| c == '\n').map_or(0, |p| p + 1) + 1;
    TemplateError::InvalidPlaceholder { line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<'a>(basename: &'a str, numeric: &'a str, alphabetic: char) -> TemplateValues<'a> {
        TemplateValues {
            basename,
            numeric,
            alphabetic,
        }
    }

    #[test]
    fn parse_template_ok() {
        let parsed = Template::parse("file_%n").expect("must parse");
        assert_eq!(
            parsed.parts(),
            &[
                TemplatePart::Literal("file_".to_string()),
                TemplatePart::Placeholder(Key::Numeric),
            ]
        );
    }

    #[test]
    fn parse_all_keys() {
        let parsed = Template::parse("%d-%a-%n").expect("must parse");
        assert!(parsed.uses(Key::Basename));
        assert!(parsed.uses(Key::Alphabetic));
        assert!(parsed.uses(Key::Numeric));
    }

    #[test]
    fn parse_template_unknown_key() {
        let err = Template::parse("%x").expect_err("must fail");
        assert_eq!(err, TemplateError::UnknownKey("x".to_string()));
    }

    #[test]
    fn identifiers_are_greedy() {
        let err = Template::parse("Episode %nfinal").expect_err("must fail");
        assert_eq!(err, TemplateError::UnknownKey("nfinal".to_string()));
    }

    #[test]
    fn braced_form_allows_trailing_identifier_chars() {
        let parsed = Template::parse("%{n}th").expect("must parse");
        let rendered = parsed.substitute(&values("x", "4", 'a'));
        assert_eq!(rendered, "4th");
    }

    #[test]
    fn keys_are_case_sensitive() {
        let err = Template::parse("%N").expect_err("must fail");
        assert_eq!(err, TemplateError::UnknownKey("N".to_string()));
    }

    #[test]
    fn doubled_delimiter_is_literal() {
        let parsed = Template::parse("100%% %d").expect("must parse");
        let rendered = parsed.substitute(&values("done", "0", 'a'));
        assert_eq!(rendered, "100% done");
    }

    #[test]
    fn trailing_delimiter_is_invalid() {
        let err = Template::parse("abc%").expect_err("must fail");
        assert_eq!(err, TemplateError::InvalidPlaceholder { line: 1, column: 4 });
    }

    #[test]
    fn delimiter_before_non_identifier_is_invalid() {
        let err = Template::parse("a\nb %1").expect_err("must fail");
        assert_eq!(err, TemplateError::InvalidPlaceholder { line: 2, column: 3 });
    }

    #[test]
    fn unclosed_brace_is_invalid() {
        let err = Template::parse("%{n").expect_err("must fail");
        assert_eq!(err, TemplateError::InvalidPlaceholder { line: 1, column: 1 });
        assert!(Template::parse("%{}").is_err());
    }

    #[test]
    fn custom_delimiter() {
        let parsed = Template::with_delimiter("#d 50% #n", '#').expect("must parse");
        assert_eq!(parsed.delimiter(), '#');
        let rendered = parsed.substitute(&values("report", "7", 'a'));
        assert_eq!(rendered, "report 50% 7");
    }

    #[test]
    fn identifier_delimiter_is_rejected() {
        let err = Template::with_delimiter("xn", 'x').expect_err("must fail");
        assert_eq!(err, TemplateError::InvalidDelimiter('x'));
        assert!(Template::with_delimiter("{n}", '{').is_err());
    }

    #[test]
    fn empty_template_renders_empty() {
        let parsed = Template::parse("").expect("must parse");
        assert!(parsed.parts().is_empty());
        assert_eq!(parsed.substitute(&values("x", "0", 'a')), "");
    }

    #[test]
    fn text_without_placeholders_passes_through() {
        let parsed = Template::parse("plain name").expect("must parse");
        assert_eq!(parsed.substitute(&values("x", "0", 'a')), "plain name");
        assert_eq!(parsed.source(), "plain name");
    }
}
