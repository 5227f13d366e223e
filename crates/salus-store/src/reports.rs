//! Uploaded lab-report storage: verbatim bytes under a sanitized filename.
//!
//! Uploads are validated against the configured size cap and extension
//! allow-list before anything touches disk. Filenames are reduced to their
//! final component and scrubbed of reserved characters, so a crafted name
//! like `../../etc/passwd` cannot escape the reports directory.

use std::path::{Path, PathBuf};

use salus_core::{now_timestamp, UploadedFileRecord};

use crate::error::StoreError;

/// Characters never allowed in a stored filename.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// File-backed report store with upload validation.
pub struct ReportStore {
    dir: PathBuf,
    max_size_bytes: u64,
    allowed_extensions: Vec<String>,
}

impl ReportStore {
    /// Store rooted at `<data_dir>/reports/`.
    pub fn new(data_dir: &Path, max_size_bytes: u64, allowed_extensions: Vec<String>) -> Self {
        Self {
            dir: data_dir.join("reports"),
            max_size_bytes,
            allowed_extensions,
        }
    }

    /// The directory reports are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and store one uploaded file, returning its session record.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> Result<UploadedFileRecord, StoreError> {
        let size = bytes.len() as u64;
        if size > self.max_size_bytes {
            return Err(StoreError::FileTooLarge {
                size,
                limit: self.max_size_bytes,
            });
        }

        let name = sanitize_filename(original_name);
        if name.is_empty() || name.chars().all(|c| c == '_' || c == '.') {
            return Err(StoreError::EmptyFilename);
        }

        let extension = extension_of(&name);
        if !self
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            return Err(StoreError::ExtensionNotAllowed(extension));
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&name);
        std::fs::write(&path, bytes)?;

        Ok(UploadedFileRecord {
            name,
            path: path.to_string_lossy().to_string(),
            timestamp: now_timestamp(),
        })
    }
}

/// Reduce a client-supplied filename to a safe final component.
///
/// Path separators count as reserved characters, so traversal sequences
/// collapse into plain underscores rather than directory structure.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if INVALID_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Lowercased extension including the leading dot, or empty.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_ascii_lowercase(),
        _ => String::new(),
    }
}
