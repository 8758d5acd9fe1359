//! Core library for motor insurance policy OCR processing.
//!
//! This crate provides:
//! - Schema-driven field extraction from OCR text (labels, look-ahead,
//!   value-shape canonicalization for dates, amounts and codes)
//! - A built-in 21-field motor insurance schema
//! - Document reading (plain text, PDF text layer, OCR of images and scans)

pub mod document;
pub mod error;
pub mod models;
pub mod policy;
pub mod schema;

pub use document::{read_document, DocumentKind, DocumentReader, PdfTextReader, PlainTextReader};
#[cfg(feature = "native")]
pub use document::OcrReader;
pub use error::{DocumentError, ExtractionError, OcrError, PolicrError, Result, SchemaError};
pub use models::config::PolicrConfig;
pub use models::record::{ExtractionReport, ExtractionResult, FieldDiagnostic, LabelMatch};
pub use policy::{DocumentText, PolicyExtractor, PolicyParser};
pub use schema::{motor_insurance, FieldSchema, FieldSpec, ValueShape};
