//! PDF text and page-image extraction using lopdf and pdf-extract.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, Luma, Rgb};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::{DocumentReader, Result};
use crate::error::DocumentError;

/// Reads the text layer embedded in a PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextReader;

impl DocumentReader for PdfTextReader {
    fn read(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path)?;
        embedded_text(&data)
    }
}

/// Load a PDF, decrypting documents protected by an empty password.
///
/// Returns the document and bytes suitable for `pdf-extract` (re-saved
/// when decryption was needed).
pub fn load(data: &[u8]) -> Result<(Document, Vec<u8>)> {
    let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

    let raw = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(DocumentError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| DocumentError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
        decrypted
    } else {
        data.to_vec()
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(DocumentError::NoPages);
    }
    debug!("Loaded PDF with {} pages", page_count);

    Ok((doc, raw))
}

/// Embedded text of every page.
pub fn embedded_text(data: &[u8]) -> Result<String> {
    let (_, raw) = load(data)?;
    let text = pdf_extract::extract_text_from_mem(&raw)
        .map_err(|e| DocumentError::TextExtraction(e.to_string()))?;
    debug!("Extracted {} characters of embedded PDF text", text.len());
    Ok(text)
}

/// Images placed on each page, in page order, for OCR of scanned PDFs.
///
/// At most `max_pages` pages are visited (0 means all).
pub fn page_images(data: &[u8], max_pages: usize) -> Result<Vec<DynamicImage>> {
    let (doc, _) = load(data)?;
    let pages = doc.get_pages();
    let limit = if max_pages == 0 { pages.len() } else { max_pages };

    let mut images = Vec::new();
    for (number, page_id) in pages.iter().take(limit) {
        let Some(resources) = page_resources(&doc, *page_id) else {
            trace!("Page {} has no resources", number);
            continue;
        };
        let Ok(xobjects) = resources.get(b"XObject") else {
            continue;
        };
        let Ok((_, Object::Dictionary(xobjects))) = doc.dereference(xobjects) else {
            continue;
        };

        for (_, reference) in xobjects.iter() {
            if let Some(img) = doc
                .dereference(reference)
                .ok()
                .and_then(|(_, object)| decode_image(&doc, object))
            {
                images.push(img);
            }
        }
        debug!("Collected {} images up to page {}", images.len(), number);
    }

    if images.is_empty() {
        return Err(DocumentError::ImageExtraction(
            "no decodable page images found".to_string(),
        ));
    }
    Ok(images)
}

/// Page resources, following inheritance up the page tree.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = dict.get(b"Resources") {
        if let Ok((_, Object::Dictionary(resources))) = doc.dereference(resources) {
            return Some(resources.clone());
        }
    }

    match dict.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => page_resources(doc, *parent_id),
        _ => None,
    }
}

fn decode_image(doc: &Document, object: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }
    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
    trace!("Found image object: {}x{}", width, height);

    let filter = dict.get(b"Filter").ok().and_then(|filter| match filter {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
        _ => None,
    });

    match filter {
        Some(b"DCTDecode") => {
            return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                .ok();
        }
        Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
            trace!("Skipping image with unsupported filter");
            return None;
        }
        _ => {}
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);
    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    let pixels = (width as usize) * (height as usize);
    match color_space {
        b"DeviceRGB" | b"RGB" if data.len() >= pixels * 3 => {
            ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, data[..pixels * 3].to_vec())
                .map(DynamicImage::ImageRgb8)
        }
        b"DeviceGray" | b"G" if data.len() >= pixels => {
            ImageBuffer::<Luma<u8>, _>::from_raw(width, height, data[..pixels].to_vec())
                .map(DynamicImage::ImageLuma8)
        }
        _ => {
            trace!(
                "Could not decode image: colorspace={:?}, data_len={}",
                String::from_utf8_lossy(color_space),
                data.len()
            );
            None
        }
    }
}
