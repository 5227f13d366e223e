//! Salus document crate - lab-report ingestion.
//!
//! Converts an uploaded file into plain text by a format-specific strategy:
//! text-layer extraction for PDFs, optical character recognition for
//! images. OCR engines sit behind the [`OcrEngine`] trait with a
//! [`MockOcr`] for testing and a [`TesseractOcr`] that shells out to the
//! `tesseract` binary.

pub mod error;
pub mod ocr;
pub mod pdf;
pub mod processor;

pub use error::DocumentError;
pub use ocr::{MockOcr, OcrEngine, TesseractOcr};
pub use processor::DocumentProcessor;
