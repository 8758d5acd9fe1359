//! Value-shape rules applied to located candidates.

pub mod codes;
pub mod confusables;
pub mod currency;
pub mod dates;
pub mod patterns;
pub mod text;

pub use codes::CodeRule;
pub use confusables::{CONFUSABLES, repair};
pub use currency::{CurrencyRule, parse_amount};
pub use dates::{is_valid_format, DateRule};
pub use text::TextRule;

use crate::error::PolicrError;
use crate::models::config::ExtractionConfig;
use crate::schema::ValueShape;

/// Trait for value-shape rules.
pub trait ValueRule {
    /// The parsed value type.
    type Output;

    /// Parse the first value of this shape out of a candidate.
    fn parse(&self, candidate: &str) -> Option<Self::Output>;

    /// Render a parsed value in canonical form; `None` if it cannot be
    /// rendered.
    fn render(&self, value: &Self::Output) -> Option<String>;

    /// Parse and render in one step; `None` when the shape is not satisfied.
    fn canonicalize(&self, candidate: &str) -> Option<String> {
        self.parse(candidate).and_then(|value| self.render(&value))
    }
}

/// Per-field post-processing: maps a raw candidate and its shape to the
/// stored value, or `None` when the candidate fails the shape.
#[derive(Debug, Clone)]
pub struct ValueNormalizer {
    dates: DateRule,
    currency: CurrencyRule,
    codes: CodeRule,
    free_text: TextRule,
    unconstrained: TextRule,
}

impl ValueNormalizer {
    pub fn new() -> Self {
        Self::build(&ExtractionConfig::default())
    }

    /// Rules configured from the extraction settings.
    ///
    /// Fails when `date_format` is not a usable chrono format.
    pub fn from_config(config: &ExtractionConfig) -> crate::Result<Self> {
        if !dates::is_valid_format(&config.date_format) {
            return Err(PolicrError::Config(format!(
                "invalid date_format {:?}",
                config.date_format
            )));
        }
        Ok(Self::build(config))
    }

    fn build(config: &ExtractionConfig) -> Self {
        let repair = config.repair_confusables;
        Self {
            dates: DateRule::new()
                .with_format(config.date_format.clone())
                .with_year_pivot(config.two_digit_year_pivot)
                .with_repair(repair),
            currency: CurrencyRule::new().with_repair(repair),
            codes: CodeRule::new(),
            free_text: TextRule::free_text(),
            unconstrained: TextRule::unconstrained(),
        }
    }

    /// Canonicalize a candidate according to `shape`.
    pub fn normalize(&self, candidate: &str, shape: ValueShape) -> Option<String> {
        match shape {
            ValueShape::None => self.unconstrained.canonicalize(candidate),
            ValueShape::FreeText => self.free_text.canonicalize(candidate),
            ValueShape::Date => self.dates.canonicalize(candidate),
            ValueShape::Currency => self.currency.canonicalize(candidate),
            ValueShape::AlphanumericCode => self.codes.canonicalize(candidate),
        }
    }
}

impl Default for ValueNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
