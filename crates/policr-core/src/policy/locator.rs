//! Label search and label-relative value location.

use tracing::debug;

use crate::models::record::LabelMatch;
use crate::schema::{FieldSpec, LabelMatcher};

use super::normalize::DocumentText;

/// Characters stripped between a label and its value.
const SEPARATORS: &[char] = &[':', '：', '-', '–', '—', '=', '|', '.', '#', '>'];

/// A raw value candidate and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: LabelMatch,
    /// Candidate text, not yet shape-validated.
    pub text: String,
    /// Original index of the line the candidate was taken from.
    pub line_index: usize,
}

/// Outcome of locating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// No label variant occurs in the document.
    NotFound,
    /// The label occurs but nothing follows it within the look-ahead.
    LabelOnly(LabelMatch),
    /// A candidate value was found.
    Candidate(Candidate),
}

/// Locate a field's value in normalized text.
///
/// Label variants are tried in declaration order and, for each, lines in
/// document order; the first hit decides. The value is the rest of the
/// label's line after any separator, or else the first of the next
/// `max_look_ahead` non-blank lines that holds more than separators.
/// Blank input lines do not count toward the distance.
pub fn locate(spec: &FieldSpec, matchers: &[LabelMatcher], doc: &DocumentText) -> Located {
    let lines = doc.lines();

    for matcher in matchers {
        for (pos, line) in lines.iter().enumerate() {
            let Some(range) = matcher.find_in(&line.text) else {
                continue;
            };

            let label = LabelMatch {
                field: spec.name.clone(),
                label: matcher.label().to_string(),
                line_index: line.index,
                char_offset: line.text[..range.start].chars().count(),
            };
            debug!(
                "Field {}: matched label {:?} on line {}",
                spec.name, label.label, line.index
            );

            let remainder = strip_separators(&line.text[range.end..]);
            if !remainder.is_empty() {
                return Located::Candidate(Candidate {
                    label,
                    text: remainder.to_string(),
                    line_index: line.index,
                });
            }

            let next = lines
                .iter()
                .skip(pos + 1)
                .take(spec.max_look_ahead)
                .find_map(|next| {
                    let text = strip_separators(&next.text);
                    (!text.is_empty()).then(|| (next.index, text.to_string()))
                });

            return match next {
                Some((line_index, text)) => Located::Candidate(Candidate {
                    label,
                    text,
                    line_index,
                }),
                None => Located::LabelOnly(label),
            };
        }
    }

    Located::NotFound
}

fn strip_separators(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .trim_end()
}
