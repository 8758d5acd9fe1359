//! Currency amount canonicalization.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::confusables::repair;
use super::patterns::{AMOUNT, AMOUNT_QUALIFIER, CURRENCY_MARKER};
use super::ValueRule;

/// Currency value rule.
///
/// Strips currency markers and thousands separators and keeps the decimal
/// places exactly as written (`12,500.00` stays two places, `1,25,000`
/// has none). Commas are always grouping separators in the target locale.
///
/// The candidate must be mostly the amount: only markers, a parenthesized
/// qualifier or a tax rate may come before it, and at most a few words
/// after it. Digits glued to letters are never an amount.
#[derive(Debug, Clone)]
pub struct CurrencyRule {
    repair: bool,
}

impl CurrencyRule {
    pub fn new() -> Self {
        Self { repair: true }
    }

    /// Enable or disable confusable repair.
    pub fn with_repair(mut self, repair: bool) -> Self {
        self.repair = repair;
        self
    }
}

impl Default for CurrencyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueRule for CurrencyRule {
    type Output = Decimal;

    fn parse(&self, candidate: &str) -> Option<Decimal> {
        let stripped = CURRENCY_MARKER.replace_all(candidate, " ");
        let cleaned = if self.repair {
            repair(&stripped)
        } else {
            stripped.into_owned()
        };

        // Percentages (tax rates, NCB) are not amounts.
        let amount = AMOUNT
            .find_iter(&cleaned)
            .find(|m| !cleaned[m.end()..].trim_start().starts_with('%'))?;

        let prefix = AMOUNT_QUALIFIER.replace_all(&cleaned[..amount.start()], "");
        if prefix.chars().any(char::is_alphanumeric) || !is_trailing_note(&cleaned[amount.end()..]) {
            return None;
        }
        parse_amount(amount.as_str())
    }

    fn render(&self, value: &Decimal) -> Option<String> {
        Some(value.to_string())
    }
}

/// Short remarks allowed after an amount, like "only" or "(incl. GST)".
///
/// A colon means the text runs into another label.
fn is_trailing_note(rest: &str) -> bool {
    !rest.contains(':') && rest.split_whitespace().count() <= MAX_NOTE_WORDS
}

const MAX_NOTE_WORDS: usize = 6;

/// Parse an amount written with comma grouping (e.g. "1,25,000.50").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&digits).ok()
}
