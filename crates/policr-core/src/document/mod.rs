//! Document reading: turns policy files into OCR text.

mod layout;
#[cfg(feature = "native")]
mod ocr;
pub mod pdf;
mod plain;

pub use layout::{lines_from_boxes, TextBox};
#[cfg(feature = "native")]
pub use ocr::OcrReader;
pub use pdf::PdfTextReader;
pub use plain::PlainTextReader;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::DocumentError;
use crate::models::config::PolicrConfig;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for sources of document text.
pub trait DocumentReader {
    /// Read the full text of the document at `path`.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Kind of document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// OCR output saved as text.
    Text,
    /// PDF, text-based or scanned.
    Pdf,
    /// Raster image.
    Image,
}

impl DocumentKind {
    /// Extensions accepted by [`read_document`].
    pub const EXTENSIONS: &'static [&'static str] =
        &["txt", "text", "pdf", "png", "jpg", "jpeg", "tif", "tiff", "bmp"];

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "txt" | "text" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Read a policy document as text, choosing a reader by file type.
///
/// PDFs use their embedded text when it is at least
/// `document.min_text_length` characters and `prefer_embedded_text` is set;
/// otherwise their page images are OCRed.
pub fn read_document(path: &Path, config: &PolicrConfig) -> Result<String> {
    let kind = DocumentKind::from_path(path)
        .ok_or_else(|| DocumentError::UnsupportedFormat(path.display().to_string()))?;
    debug!("Reading {} as {:?}", path.display(), kind);

    let text = match kind {
        DocumentKind::Text => PlainTextReader.read(path)?,
        DocumentKind::Pdf => read_pdf(path, config)?,
        DocumentKind::Image => ocr_read(path, config)?,
    };

    if text.trim().is_empty() {
        return Err(DocumentError::EmptyText(path.display().to_string()));
    }
    Ok(text)
}

fn read_pdf(path: &Path, config: &PolicrConfig) -> Result<String> {
    let embedded = if config.document.prefer_embedded_text {
        PdfTextReader.read(path)?
    } else {
        String::new()
    };

    let embedded_len = embedded.trim().chars().count();
    if embedded_len >= config.document.min_text_length {
        info!("Using embedded text of {} ({} chars)", path.display(), embedded_len);
        return Ok(embedded);
    }

    match ocr_read(path, config) {
        Ok(text) => Ok(text),
        Err(e) if embedded_len > 0 => {
            warn!("OCR failed for {}, using short embedded text: {}", path.display(), e);
            Ok(embedded)
        }
        Err(e) => Err(e),
    }
}

#[cfg(feature = "native")]
fn ocr_read(path: &Path, config: &PolicrConfig) -> Result<String> {
    let reader = OcrReader::new(&config.ocr, config.document.max_pages)
        .map_err(|e| DocumentError::OcrUnavailable(e.to_string()))?;
    reader.read(path)
}

#[cfg(not(feature = "native"))]
fn ocr_read(path: &Path, _config: &PolicrConfig) -> Result<String> {
    Err(DocumentError::OcrUnavailable(format!(
        "{} needs OCR but the native feature is disabled",
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_path(Path::new("a.TXT")), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_path(Path::new("a.pdf")), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_path(Path::new("scan.jpeg")), Some(DocumentKind::Image));
        assert_eq!(DocumentKind::from_path(Path::new("a.docx")), None);
        assert_eq!(DocumentKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_read_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(&path, "Policy Number: PN1").unwrap();

        let text = read_document(&path, &PolicrConfig::default()).unwrap();
        assert_eq!(text, "Policy Number: PN1");
    }

    #[test]
    fn test_blank_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, " \n \n").unwrap();

        assert!(matches!(
            read_document(&path, &PolicrConfig::default()),
            Err(DocumentError::EmptyText(_))
        ));
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            read_document(Path::new("policy.docx"), &PolicrConfig::default()),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_image_without_models() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"png").unwrap();

        let mut config = PolicrConfig::default();
        config.ocr.model_dir = dir.path().join("no-models");

        assert!(matches!(
            read_document(&path, &config),
            Err(DocumentError::OcrUnavailable(_))
        ));
    }
}
