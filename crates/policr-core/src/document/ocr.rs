//! OCR of images and scanned PDFs using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info};

use super::layout::{lines_from_boxes, TextBox};
use super::{DocumentKind, DocumentReader, Result};
use crate::error::{DocumentError, OcrError};
use crate::models::config::OcrConfig;

/// Document reader backed by a pure Rust OCR engine.
pub struct OcrReader {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
    max_pages: usize,
}

impl OcrReader {
    /// Load the detection and recognition models named in `config`.
    pub fn new(config: &OcrConfig, max_pages: usize) -> std::result::Result<Self, OcrError> {
        if !config.models_available() {
            return Err(OcrError::ModelLoad(format!(
                "models not found in {}",
                config.model_dir.display()
            )));
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&config.model_path(&config.detection_model))
            .rec_model_path(&config.model_path(&config.recognition_model))
            .dictionary_path(&config.model_path(&config.dictionary))
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded OCR engine from {}", config.model_dir.display());

        Ok(Self {
            engine,
            config: config.clone(),
            max_pages,
        })
    }

    /// Recognize the text of one image as reading-order lines.
    pub fn recognize(&self, image: &DynamicImage) -> std::result::Result<String, OcrError> {
        let start = Instant::now();

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| {
                let points: Vec<(f32, f32)> = r
                    .bounding_box
                    .exterior()
                    .coords()
                    .map(|c| (c.x as f32, c.y as f32))
                    .collect();
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                TextBox::from_points(text, &points)
            })
            .collect();

        let box_count = boxes.len();
        let text = lines_from_boxes(boxes, self.config.row_tolerance);

        info!(
            "OCR complete: {} text boxes in {}ms",
            box_count,
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}

impl DocumentReader for OcrReader {
    fn read(&self, path: &Path) -> Result<String> {
        let images = match DocumentKind::from_path(path) {
            Some(DocumentKind::Pdf) => {
                let data = std::fs::read(path)?;
                super::pdf::page_images(&data, self.max_pages)?
            }
            Some(DocumentKind::Image) => {
                let image = image::open(path)
                    .map_err(|e| OcrError::InvalidImage(format!("{}: {}", path.display(), e)))?;
                vec![image]
            }
            _ => {
                return Err(DocumentError::UnsupportedFormat(path.display().to_string()));
            }
        };

        debug!("Running OCR on {} page images from {}", images.len(), path.display());

        let pages = images
            .iter()
            .map(|image| self.recognize(image))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pages.join("\n\n"))
    }
}
