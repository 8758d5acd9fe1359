//! Alphanumeric code canonicalization (registration, policy, engine and
//! chassis numbers).

use super::patterns::CODE;
use super::ValueRule;

/// Code value rule.
///
/// Uppercases and removes internal whitespace so "MH 12 AB 1234" and
/// "MH12AB1234" canonicalize identically. Letters are kept as read: a
/// registration series `S` or a VIN `B` is not a misread digit. The result
/// must be 3..=40 characters of `[A-Z0-9/-]` with at least one digit.
#[derive(Debug, Clone, Default)]
pub struct CodeRule;

impl CodeRule {
    pub fn new() -> Self {
        Self
    }
}

impl ValueRule for CodeRule {
    type Output = String;

    fn parse(&self, candidate: &str) -> Option<String> {
        let compact: String = candidate
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        let code = compact.trim_matches(|c: char| c == '-' || c == '/').to_string();
        (CODE.is_match(&code) && code.chars().any(|c| c.is_ascii_digit())).then_some(code)
    }

    fn render(&self, value: &String) -> Option<String> {
        Some(value.clone())
    }
}
