//! OCR engine trait and implementations.
//!
//! [`TesseractOcr`] wraps the `tesseract` command-line binary, the same
//! engine the upstream desktop tooling relies on. Its presence is probed
//! lazily at extraction time so a missing install surfaces as a
//! descriptive error, never a startup failure.

use std::path::Path;
use std::process::Command;

use crate::error::DocumentError;

/// Engine for extracting text from an image file.
pub trait OcrEngine: Send + Sync {
    /// Extract text from the image at `path`.
    ///
    /// May return an empty string if no text is detected.
    fn extract_text(&self, path: &Path) -> Result<String, DocumentError>;
}

/// OCR engine backed by the `tesseract` CLI.
pub struct TesseractOcr {
    command: String,
    language: String,
}

impl TesseractOcr {
    /// Engine using `tesseract` from `PATH` with English text.
    pub fn new() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }

    /// Override the binary name or path. Used by tests to simulate a
    /// missing install.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: "eng".to_string(),
        }
    }

    /// Override the recognition language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Probe whether the binary can be launched at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .is_ok()
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn extract_text(&self, path: &Path) -> Result<String, DocumentError> {
        if !self.is_available() {
            return Err(DocumentError::OcrUnavailable);
        }

        let output = Command::new(&self.command)
            .arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| DocumentError::Ocr(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocumentError::Ocr(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Mock OCR engine for testing.
///
/// Returns deterministic text without invoking a real engine.
#[derive(Debug, Clone)]
pub struct MockOcr {
    response_text: String,
}

impl MockOcr {
    /// Mock that returns the specified text for any input.
    pub fn with_text(text: &str) -> Self {
        Self {
            response_text: text.to_string(),
        }
    }

    /// Mock that returns empty text (no text detected).
    pub fn empty() -> Self {
        Self {
            response_text: String::new(),
        }
    }
}

impl OcrEngine for MockOcr {
    fn extract_text(&self, _path: &Path) -> Result<String, DocumentError> {
        Ok(self.response_text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mock_ocr_returns_configured_text() {
        let ocr = MockOcr::with_text("Hemoglobin 13.5 g/dL");
        let text = ocr.extract_text(&PathBuf::from("scan.png")).unwrap();
        assert_eq!(text, "Hemoglobin 13.5 g/dL");
    }

    #[test]
    fn test_mock_ocr_empty() {
        let ocr = MockOcr::empty();
        assert!(ocr.extract_text(&PathBuf::from("scan.png")).unwrap().is_empty());
    }

    #[test]
    fn test_mock_ocr_deterministic() {
        let ocr = MockOcr::with_text("same");
        let a = ocr.extract_text(&PathBuf::from("a.jpg")).unwrap();
        let b = ocr.extract_text(&PathBuf::from("b.jpg")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_binary_reports_unavailable() {
        let ocr = TesseractOcr::with_command("salus-test-no-such-binary");
        assert!(!ocr.is_available());
        let err = ocr.extract_text(&PathBuf::from("scan.png")).unwrap_err();
        assert!(matches!(err, DocumentError::OcrUnavailable));
    }

    #[test]
    fn test_language_override() {
        let ocr = TesseractOcr::new().with_language("deu");
        assert_eq!(ocr.language, "deu");
    }
}
