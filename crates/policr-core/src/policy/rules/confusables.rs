//! OCR-confusable character repair.
//!
//! The table is only consulted while validating a value against a date or
//! currency shape. Normalized document text is never rewritten.

use tracing::trace;

/// Characters OCR commonly emits in place of a digit.
pub const CONFUSABLES: &[(char, char)] = &[
    ('O', '0'),
    ('o', '0'),
    ('Q', '0'),
    ('D', '0'),
    ('I', '1'),
    ('l', '1'),
    ('|', '1'),
    ('i', '1'),
    ('Z', '2'),
    ('z', '2'),
    ('S', '5'),
    ('s', '5'),
    ('G', '6'),
    ('B', '8'),
];

/// Digit a confusable character stands for.
pub fn digit_for(c: char) -> Option<char> {
    CONFUSABLES
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Replace confusable characters in numeric tokens.
///
/// The value is split into numeric tokens (digits, confusables and the
/// separators `. , / - :`). Confusables inside a token that holds at least
/// one real digit become digits, unless their run is glued to a letter
/// outside the token, as in `15-Oct-2024`. Only date and amount rules call
/// this; codes legitimately mix letters and digits.
pub fn repair(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = chars.clone();

    let mut start = 0;
    while start < chars.len() {
        let end = start + chars[start..].iter().take_while(|c| in_numeric_token(**c)).count();
        if end == start {
            start += 1;
            continue;
        }
        if chars[start..end].iter().any(char::is_ascii_digit) {
            repair_token(&chars, &mut out, start, end);
        }
        start = end;
    }

    let repaired: String = out.into_iter().collect();
    if repaired != value {
        trace!("Repaired confusables {:?} -> {:?}", value, repaired);
    }
    repaired
}

fn in_numeric_token(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '/' | '-' | ':') || digit_for(c).is_some()
}

fn repair_token(chars: &[char], out: &mut [char], start: usize, end: usize) {
    let mut i = start;
    while i < end {
        if digit_for(chars[i]).is_none() {
            i += 1;
            continue;
        }
        let run_end = i + chars[i..end].iter().take_while(|c| digit_for(**c).is_some()).count();

        let letter_before = i == start && i > 0 && chars[i - 1].is_alphabetic();
        let letter_after = run_end == end && chars.get(run_end).is_some_and(|c| c.is_alphabetic());
        if !letter_before && !letter_after {
            for j in i..run_end {
                out[j] = digit_for(chars[j]).unwrap_or(chars[j]);
            }
        }
        i = run_end;
    }
}
