//! Configuration structures for document reading and field extraction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the policr pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicrConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Document reading configuration.
    pub document: DocumentConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Custom schema JSON file. The built-in motor schema is used when unset.
    pub schema_path: Option<PathBuf>,

    /// chrono format string for canonical dates.
    pub date_format: String,

    /// Two-digit years up to this value map to 20xx, the rest to 19xx.
    pub two_digit_year_pivot: u32,

    /// Repair OCR-confusable characters in numeric contexts.
    pub repair_confusables: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            schema_path: None,
            date_format: "%d/%m/%Y".to_string(),
            two_digit_year_pivot: 50,
            repair_confusables: true,
        }
    }
}

/// Document reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Try embedded PDF text before falling back to OCR.
    pub prefer_embedded_text: bool,

    /// Minimum embedded text length to treat a PDF as text-based.
    pub min_text_length: usize,

    /// Maximum pages to OCR (0 = unlimited).
    pub max_pages: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            prefer_embedded_text: true,
            min_text_length: 50,
            max_pages: 10,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens emitted by the recognizer.
    pub keep_unk: bool,

    /// Vertical distance (pixels) under which two boxes share a text line.
    pub row_tolerance: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
            row_tolerance: 15.0,
        }
    }
}

impl OcrConfig {
    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(model_name)
    }

    /// Whether both required models are present on disk.
    pub fn models_available(&self) -> bool {
        self.model_path(&self.detection_model).exists()
            && self.model_path(&self.recognition_model).exists()
            && self.model_path(&self.dictionary).exists()
    }
}

impl PolicrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PolicrConfig =
            serde_json::from_str(r#"{"extraction": {"date_format": "%Y-%m-%d"}}"#).unwrap();

        assert_eq!(config.extraction.date_format, "%Y-%m-%d");
        assert_eq!(config.extraction.two_digit_year_pivot, 50);
        assert!(config.extraction.repair_confusables);
        assert_eq!(config.document.min_text_length, 50);
        assert_eq!(config.ocr.detection_model, "det.onnx");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PolicrConfig::default();
        config.document.max_pages = 3;
        config.save(&path).unwrap();

        let loaded = PolicrConfig::from_file(&path).unwrap();
        assert_eq!(loaded.document.max_pages, 3);
    }

    #[test]
    fn test_models_not_available_in_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = OcrConfig {
            model_dir: dir.path().to_path_buf(),
            ..OcrConfig::default()
        };
        assert!(!ocr.models_available());
    }
}
