//! Compiled label variants.

use std::ops::Range;

use regex::Regex;

use crate::error::SchemaError;

/// A label variant compiled into a case-insensitive matcher.
///
/// Words of the label match across any run of whitespace (including none,
/// since OCR regularly swallows spaces). A hit only counts when it is not
/// glued to a letter or digit on either side.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    label: String,
    regex: Regex,
    alnum_start: bool,
    alnum_end: bool,
}

impl LabelMatcher {
    pub fn new(field: &str, label: &str) -> Result<Self, SchemaError> {
        let words: Vec<String> = label.split_whitespace().map(regex::escape).collect();
        if words.is_empty() {
            return Err(SchemaError::EmptyLabel(field.to_string()));
        }

        let pattern = format!(r"(?i){}", words.join(r"\s*"));
        let regex = Regex::new(&pattern).map_err(|e| SchemaError::InvalidLabel {
            field: field.to_string(),
            label: label.to_string(),
            reason: e.to_string(),
        })?;

        let trimmed = label.trim();
        Ok(Self {
            label: trimmed.to_string(),
            regex,
            alnum_start: trimmed.chars().next().is_some_and(char::is_alphanumeric),
            alnum_end: trimmed.chars().last().is_some_and(char::is_alphanumeric),
        })
    }

    /// The label variant as declared.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Byte range of the first bounded occurrence in `line`.
    pub fn find_in(&self, line: &str) -> Option<Range<usize>> {
        let mut start = 0;
        while start <= line.len() {
            let m = self.regex.find_at(line, start)?;
            if self.bounded(line, m.start(), m.end()) {
                return Some(m.range());
            }
            // Retry one character further so overlapping hits are not skipped.
            start = m.start() + line[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    fn bounded(&self, line: &str, start: usize, end: usize) -> bool {
        let before_ok = !self.alnum_start
            || line[..start].chars().next_back().is_none_or(|c| !c.is_alphanumeric());
        let after_ok =
            !self.alnum_end || line[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    }
}
