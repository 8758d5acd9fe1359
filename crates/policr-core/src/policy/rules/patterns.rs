//! Common regex patterns for policy value validation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numeric dates, day first (15/01/2024, 15-01-24, 15.01.2024)
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})\b"
    ).unwrap();

    // ISO-like dates (2024-01-15, 2024/01/15)
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})\b"
    ).unwrap();

    // 15 Jan 2024, 15-Jan-24, 15 January, 2024
    pub static ref DATE_DAY_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b(\d{1,2})[\s\-./]*(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[\s\-./,]*(\d{4}|\d{2})\b"
    ).unwrap();

    // January 15, 2024
    pub static ref DATE_MONTH_NAME_DAY: Regex = Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2}),?\s+(\d{4})\b"
    ).unwrap();

    // 1st, 2nd, 23rd, 15th
    pub static ref ORDINAL_SUFFIX: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b"
    ).unwrap();

    // Currency symbols, codes and the Indian "/-" amount terminator
    pub static ref CURRENCY_MARKER: Regex = Regex::new(
        r"(?i)₹|\brupees\b|\b(?:rs|inr)\.?|\$|€|£|/-"
    ).unwrap();

    // Amount with optional comma grouping (12,500.00 or 1,25,000), not
    // glued to letters (MH12AB1234 holds no amount)
    pub static ref AMOUNT: Regex = Regex::new(
        r"\b\d(?:[\d,]*\d)?(?:\.\d+)?\b"
    ).unwrap();

    // Qualifiers allowed between a label and its amount: "(IDV)", "@18%"
    pub static ref AMOUNT_QUALIFIER: Regex = Regex::new(
        r"\([^)]*\)|@?\s*\d+(?:\.\d+)?\s*%"
    ).unwrap();

    // Canonical code characters after whitespace removal
    pub static ref CODE: Regex = Regex::new(
        r"^[A-Z0-9/\-]{3,40}$"
    ).unwrap();

    // Placeholder values that mean "no value"
    pub static ref PLACEHOLDER: Regex = Regex::new(
        r"(?i)^(?:n\.?\s*/?\s*a\.?|nil|none|null|not\s+applicable|-+|\.+)$"
    ).unwrap();
}
