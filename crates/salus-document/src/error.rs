//! Error types for document ingestion.

use salus_core::SalusError;

/// Errors from the ingestion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported file format {0:?}; upload a PDF or image file")]
    UnsupportedFormat(String),
    #[error("Tesseract OCR is not installed; install it to enable image text extraction")]
    OcrUnavailable,
    #[error("OCR failed: {0}")]
    Ocr(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DocumentError> for SalusError {
    fn from(err: DocumentError) -> Self {
        SalusError::Document(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_display() {
        let err = DocumentError::UnsupportedFormat(".txt".to_string());
        assert_eq!(
            err.to_string(),
            "unsupported file format \".txt\"; upload a PDF or image file"
        );

        let err = DocumentError::OcrUnavailable;
        assert!(err.to_string().contains("not installed"));

        let err = DocumentError::Pdf("bad xref".to_string());
        assert_eq!(err.to_string(), "PDF extraction failed: bad xref");
    }

    #[test]
    fn test_document_error_converts_to_salus_error() {
        let err = DocumentError::Ocr("engine crash".to_string());
        let top: SalusError = err.into();
        assert!(matches!(top, SalusError::Document(_)));
        assert!(top.to_string().contains("engine crash"));
    }
}
