//! Free-text and unconstrained values.

use super::patterns::PLACEHOLDER;
use super::ValueRule;
use crate::policy::normalize::collapse_whitespace;

/// Rule for human text such as names and addresses.
///
/// With `reject_placeholders` set, values like "N/A" or "-" and values
/// without any letter or digit are rejected.
#[derive(Debug, Clone)]
pub struct TextRule {
    reject_placeholders: bool,
}

impl TextRule {
    /// Accepts any non-empty text.
    pub fn unconstrained() -> Self {
        Self {
            reject_placeholders: false,
        }
    }

    /// Rejects placeholders and punctuation-only values.
    pub fn free_text() -> Self {
        Self {
            reject_placeholders: true,
        }
    }
}

impl ValueRule for TextRule {
    type Output = String;

    fn parse(&self, candidate: &str) -> Option<String> {
        let text = collapse_whitespace(candidate);
        if text.is_empty() {
            return None;
        }
        if self.reject_placeholders
            && (PLACEHOLDER.is_match(&text) || !text.chars().any(char::is_alphanumeric))
        {
            return None;
        }
        Some(text)
    }

    fn render(&self, value: &String) -> Option<String> {
        Some(value.clone())
    }
}
