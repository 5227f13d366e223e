//! Extension-dispatched document processing.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::DocumentError;
use crate::ocr::{OcrEngine, TesseractOcr};
use crate::pdf;

/// Converts an uploaded file into plain text.
///
/// Dispatch is by file-extension suffix, case-insensitive: `.pdf` routes to
/// text-layer extraction, `.jpg`/`.jpeg`/`.png` to the OCR engine. Any
/// other extension is rejected before any file access happens.
pub struct DocumentProcessor {
    ocr: Box<dyn OcrEngine>,
}

impl DocumentProcessor {
    /// Processor with the given OCR engine.
    pub fn new(ocr: Box<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    /// Processor with the default Tesseract CLI engine.
    pub fn with_tesseract() -> Self {
        Self::new(Box::new(TesseractOcr::new()))
    }

    /// Extract plain text from the file at `path`.
    pub fn process(&self, path: &Path) -> Result<String, DocumentError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => {
                info!(path = %path.display(), "Extracting PDF text layer");
                pdf::extract_text(path)
            }
            "jpg" | "jpeg" | "png" => {
                info!(path = %path.display(), "Running OCR");
                self.ocr.extract_text(path)
            }
            other => Err(DocumentError::UnsupportedFormat(format!(".{}", other))),
        }
    }

    /// Extract embedded page images from a PDF into `output_dir`.
    pub fn extract_images(
        &self,
        pdf_path: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, DocumentError> {
        pdf::extract_images(pdf_path, output_dir)
    }
}
