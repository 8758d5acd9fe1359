//! Pre-computed OCR text files.

use std::path::Path;

use tracing::debug;

use super::{DocumentReader, Result};
use crate::error::DocumentError;

/// Reads UTF-8 text files produced by an external OCR step.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn read(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            DocumentError::TextExtraction(format!("{} is not UTF-8: {}", path.display(), e))
        })?;
        debug!("Read {} characters from {}", text.len(), path.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(&path, "Total Premium: ₹ 7,080").unwrap();

        assert_eq!(PlainTextReader.read(&path).unwrap(), "Total Premium: ₹ 7,080");
    }

    #[test]
    fn test_rejects_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(&path, [0xffu8, 0xfe, 0x01]).unwrap();

        assert!(matches!(
            PlainTextReader.read(&path),
            Err(DocumentError::TextExtraction(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            PlainTextReader.read(Path::new("/nonexistent/policy.txt")),
            Err(DocumentError::Io(_))
        ));
    }
}
