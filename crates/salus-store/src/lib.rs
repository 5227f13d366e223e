//! Salus persistence crate - JSON file storage for session data.
//!
//! Three stores, all rooted under the configured data directory:
//! transcripts (single fixed-path document, full overwrite per save),
//! appointments (one timestamp-named file per save, append-only), and
//! uploaded lab reports (verbatim bytes under a sanitized filename).

pub mod appointments;
pub mod error;
pub mod reports;
pub mod transcript;

pub use appointments::AppointmentStore;
pub use error::StoreError;
pub use reports::{sanitize_filename, ReportStore};
pub use transcript::TranscriptStore;
