//! Policy field extraction module.

mod locator;
mod normalize;
mod parser;
pub mod rules;

pub use locator::{locate, Candidate, Located};
pub use normalize::{collapse_whitespace, DocumentText, TextLine};
pub use parser::PolicyExtractor;

use crate::error::ExtractionError;
use crate::models::record::ExtractionReport;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for policy parsers.
pub trait PolicyParser {
    /// Parse policy fields from OCR text.
    fn parse(&self, text: &str) -> Result<ExtractionReport>;
}
