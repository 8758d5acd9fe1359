//! Text normalization applied before any field search.

/// One non-blank line of normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// Index of the line in the raw input, blank lines included.
    pub index: usize,
    /// Trimmed text with whitespace runs collapsed to one space.
    pub text: String,
}

/// Normalized OCR text as an ordered sequence of non-blank lines.
///
/// Created once per extraction call and never mutated afterwards.
/// Confusable-character repair is deliberately not applied here; it only
/// runs during value validation so label text is never altered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    lines: Vec<TextLine>,
}

impl DocumentText {
    /// Normalize raw text: split on line breaks, collapse whitespace, drop
    /// blank lines.
    pub fn normalize(raw: &str) -> Self {
        let lines = split_lines(raw)
            .enumerate()
            .filter_map(|(index, line)| {
                let text = collapse_whitespace(line);
                (!text.is_empty()).then_some(TextLine { index, text })
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the normalized lines back into text.
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split on `\r\n`, `\n`, `\r`, form feeds (page breaks) and Unicode line
/// and paragraph separators.
fn split_lines(raw: &str) -> impl Iterator<Item = &str> {
    let mut rest = raw;
    let mut done = raw.is_empty();
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match rest.find(['\n', '\r', '\u{000c}', '\u{2028}', '\u{2029}']) {
            Some(pos) => {
                let line = &rest[..pos];
                let sep_len = if rest[pos..].starts_with("\r\n") {
                    2
                } else {
                    rest[pos..].chars().next().map_or(1, char::len_utf8)
                };
                rest = &rest[pos + sep_len..];
                Some(line)
            }
            None => {
                done = true;
                Some(rest)
            }
        }
    })
}

/// Trim and collapse every whitespace run (including non-breaking spaces
/// and tabs) to a single space. Zero-width characters are dropped.
pub fn collapse_whitespace(s: &str) -> String {
    s.split(|c: char| c.is_whitespace())
        .map(|word| word.replace(['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}'], ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(doc: &DocumentText) -> Vec<&str> {
        doc.lines().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_collapse_and_drop_blank_lines() {
        let doc = DocumentText::normalize("  Policy   Number :\tPN1 \n\n   \nInsured\u{a0}Name\n");
        assert_eq!(texts(&doc), ["Policy Number : PN1", "Insured Name"]);
        assert_eq!(doc.lines()[0].index, 0);
        assert_eq!(doc.lines()[1].index, 3);
    }

    #[test]
    fn test_line_break_variants_keep_indices() {
        let doc = DocumentText::normalize("a\r\nb\rc\u{000c}d\n\ne");
        assert_eq!(texts(&doc), ["a", "b", "c", "d", "e"]);
        let indices: Vec<_> = doc.lines().iter().map(|l| l.index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_case_is_preserved() {
        let doc = DocumentText::normalize("Policy NUMBER: pn1");
        assert_eq!(texts(&doc), ["Policy NUMBER: pn1"]);
    }

    #[test]
    fn test_confusables_are_not_repaired() {
        let doc = DocumentText::normalize("P0LICY NO: 12O4");
        assert_eq!(doc.to_text(), "P0LICY NO: 12O4");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(DocumentText::normalize("").is_empty());
        assert!(DocumentText::normalize(" \n\t\r\n \u{200b} ").is_empty());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = " Reg. No. :  MH 12\r\n\r\n\tInsured   Name\n  John  Doe  ";
        let once = DocumentText::normalize(raw);
        let twice = DocumentText::normalize(&once.to_text());
        assert_eq!(texts(&once), texts(&twice));
        assert_eq!(once.to_text(), twice.to_text());
    }
}
