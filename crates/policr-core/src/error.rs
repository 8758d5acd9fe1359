//! Error types for the policr-core library.

use thiserror::Error;

use crate::models::record::ExtractionResult;

/// Main error type for the policr library.
#[derive(Error, Debug)]
pub enum PolicrError {
    /// Document reading error (PDF parsing, OCR collaborator output).
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Field schema error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a document into text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to extract embedded text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to extract page images.
    #[error("failed to extract images: {0}")]
    ImageExtraction(String),

    /// File extension not handled by any reader.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The reader ran but produced no text at all.
    #[error("no text could be read from {0}")]
    EmptyText(String),

    /// The document needs OCR but no OCR backend is usable.
    #[error("OCR unavailable: {0}")]
    OcrUnavailable(String),

    /// OCR failed on the document.
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error while reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the OCR backend.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Image could not be opened or decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Whole-input failures of the extraction engine.
///
/// Missing or malformed individual fields are never errors; they surface as
/// empty values in the result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The text has no non-blank line, so no extraction was attempted.
    /// Carries the schema's result with every field empty.
    #[error("input text is empty")]
    EmptyInput { result: Box<ExtractionResult> },

    /// The input bytes are not valid UTF-8 text.
    #[error("input is not valid UTF-8 text: {0}")]
    UndecodableInput(String),
}

/// Errors raised while building a field schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Two fields share the same canonical name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// A field was declared with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// A field has no label variants.
    #[error("field {0} has no labels")]
    NoLabels(String),

    /// A label variant is blank.
    #[error("field {0} has an empty label")]
    EmptyLabel(String),

    /// A label could not be compiled into a matcher.
    #[error("invalid label {label:?} for field {field}: {reason}")]
    InvalidLabel {
        field: String,
        label: String,
        reason: String,
    },

    /// Schema JSON could not be parsed.
    #[error("failed to parse schema: {0}")]
    Parse(String),
}

/// Result type for the policr library.
pub type Result<T> = std::result::Result<T, PolicrError>;
