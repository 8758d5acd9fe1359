//! Date canonicalization.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use super::confusables::repair;
use super::patterns::{DATE_DAY_MONTH_NAME, DATE_DMY, DATE_MONTH_NAME_DAY, DATE_YMD, ORDINAL_SUFFIX};
use super::ValueRule;

/// Date value rule.
///
/// Accepts day-first numeric dates, ISO dates and dates with month names,
/// and takes the first valid date in the candidate.
#[derive(Debug, Clone)]
pub struct DateRule {
    format: String,
    year_pivot: u32,
    repair: bool,
}

impl DateRule {
    pub fn new() -> Self {
        Self {
            format: "%d/%m/%Y".to_string(),
            year_pivot: 50,
            repair: true,
        }
    }

    /// Set the chrono output format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the two-digit year pivot.
    pub fn with_year_pivot(mut self, pivot: u32) -> Self {
        self.year_pivot = pivot;
        self
    }

    /// Enable or disable confusable repair.
    pub fn with_repair(mut self, repair: bool) -> Self {
        self.repair = repair;
        self
    }

    fn parse_year(&self, s: &str) -> i32 {
        let year: i32 = s.parse().unwrap_or(0);
        if s.len() <= 2 {
            if year <= self.year_pivot as i32 {
                2000 + year
            } else {
                1900 + year
            }
        } else {
            year
        }
    }

    /// Earliest valid date in `text` with its byte offset.
    fn first_date(&self, text: &str) -> Option<(usize, NaiveDate)> {
        let mut found: Vec<(usize, NaiveDate)> = Vec::new();

        // DD/MM/YYYY, DD-MM-YY, DD.MM.YYYY
        if let Some(hit) = DATE_DMY.captures_iter(text).find_map(|caps| {
            let day = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let year = self.parse_year(&caps[3]);
            let start = caps.get(0)?.start();
            NaiveDate::from_ymd_opt(year, month, day).map(|d| (start, d))
        }) {
            found.push(hit);
        }

        // YYYY-MM-DD
        if let Some(hit) = DATE_YMD.captures_iter(text).find_map(|caps| {
            let year = caps[1].parse().ok()?;
            let month = caps[2].parse().ok()?;
            let day = caps[3].parse().ok()?;
            let start = caps.get(0)?.start();
            NaiveDate::from_ymd_opt(year, month, day).map(|d| (start, d))
        }) {
            found.push(hit);
        }

        // 15 Jan 2024
        if let Some(hit) = DATE_DAY_MONTH_NAME.captures_iter(text).find_map(|caps| {
            let day = caps[1].parse().ok()?;
            let month = month_number(&caps[2])?;
            let year = self.parse_year(&caps[3]);
            let start = caps.get(0)?.start();
            NaiveDate::from_ymd_opt(year, month, day).map(|d| (start, d))
        }) {
            found.push(hit);
        }

        // January 15, 2024
        if let Some(hit) = DATE_MONTH_NAME_DAY.captures_iter(text).find_map(|caps| {
            let month = month_number(&caps[1])?;
            let day = caps[2].parse().ok()?;
            let year = caps[3].parse().ok()?;
            let start = caps.get(0)?.start();
            NaiveDate::from_ymd_opt(year, month, day).map(|d| (start, d))
        }) {
            found.push(hit);
        }

        found.into_iter().min_by_key(|(start, _)| *start)
    }
}

impl Default for DateRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueRule for DateRule {
    type Output = NaiveDate;

    fn parse(&self, candidate: &str) -> Option<NaiveDate> {
        let cleaned = ORDINAL_SUFFIX.replace_all(candidate, "$1");
        let cleaned = if self.repair {
            repair(&cleaned)
        } else {
            cleaned.into_owned()
        };
        self.first_date(&cleaned).map(|(_, date)| date)
    }

    fn render(&self, value: &NaiveDate) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", value.format(&self.format)).ok()?;
        Some(out)
    }
}

/// Whether `format` is a chrono format string every date can be rendered
/// with.
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn month_number(month: &str) -> Option<u32> {
    let prefix: String = month.to_lowercase().chars().take(3).collect();
    let number = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_day_first_numeric() {
        let rule = DateRule::new();
        assert_eq!(rule.parse("15/01/2024"), date(2024, 1, 15));
        assert_eq!(rule.parse("15-01-2024"), date(2024, 1, 15));
        assert_eq!(rule.parse("15.01.2024"), date(2024, 1, 15));
        assert_eq!(rule.parse("5/1/24"), date(2024, 1, 5));
    }

    #[test]
    fn test_iso() {
        assert_eq!(DateRule::new().parse("2024-01-15"), date(2024, 1, 15));
    }

    #[test]
    fn test_month_names() {
        let rule = DateRule::new();
        assert_eq!(rule.parse("15-Jan-2024"), date(2024, 1, 15));
        assert_eq!(rule.parse("15 January, 2024"), date(2024, 1, 15));
        assert_eq!(rule.parse("1st Sept 2024"), date(2024, 9, 1));
        assert_eq!(rule.parse("March 3, 2023"), date(2023, 3, 3));
    }

    #[test]
    fn test_first_date_wins() {
        let rule = DateRule::new();
        assert_eq!(
            rule.parse("From 01/04/2024 00:00 hrs To 31/03/2025 Midnight"),
            date(2024, 4, 1)
        );
        assert_eq!(rule.parse("12 Mar 2024 (renewed 2024-05-01)"), date(2024, 3, 12));
    }

    #[test]
    fn test_rejects_impossible_and_missing() {
        let rule = DateRule::new();
        assert_eq!(rule.parse("31/02/2024"), None);
        assert_eq!(rule.parse("N/A"), None);
        assert_eq!(rule.parse(""), None);
    }

    #[test]
    fn test_confusable_repair() {
        assert_eq!(DateRule::new().parse("O1/O4/2O24"), date(2024, 4, 1));
        assert_eq!(DateRule::new().with_repair(false).parse("O1/O4/2O24"), None);
    }

    #[test]
    fn test_year_pivot() {
        let rule = DateRule::new().with_year_pivot(30);
        assert_eq!(rule.parse("01/01/45"), date(1945, 1, 1));
        assert_eq!(rule.parse("01/01/25"), date(2025, 1, 1));
    }

    #[test]
    fn test_render_format() {
        let rule = DateRule::new();
        assert_eq!(rule.canonicalize("2024-01-05").as_deref(), Some("05/01/2024"));

        let iso = DateRule::new().with_format("%Y-%m-%d");
        assert_eq!(iso.canonicalize("5 Jan 2024").as_deref(), Some("2024-01-05"));
    }

    #[test]
    fn test_bad_format_rejects_instead_of_panicking() {
        let rule = DateRule::new().with_format("%Q");
        assert_eq!(rule.parse("15/01/2024"), date(2024, 1, 15));
        assert_eq!(rule.canonicalize("15/01/2024"), None);
    }

    #[test]
    fn test_format_validation() {
        assert!(is_valid_format("%d/%m/%Y"));
        assert!(is_valid_format("%d %B %Y"));
        assert!(!is_valid_format("%Q"));
        assert!(!is_valid_format("%d/%"));
    }
}
