//! Transcript persistence: one pretty-printed JSON array at a fixed path.
//!
//! The full transcript is rewritten on every save. Loading is deliberately
//! forgiving: an absent or malformed document yields an empty transcript
//! with a warning, never an error, so a damaged file cannot take the
//! session down.

use std::path::{Path, PathBuf};

use tracing::warn;

use salus_core::{ChatTurn, Transcript};

use crate::error::StoreError;

/// File-backed transcript store.
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Store rooted at `<data_dir>/chats/chat_history.json`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("chats").join("chat_history.json"),
        }
    }

    /// The fixed document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full ordered transcript, overwriting any prior
    /// contents. Parent directories are created if absent.
    pub fn save(&self, transcript: &[ChatTurn]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(transcript)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Deserialize the stored transcript.
    ///
    /// Returns an empty transcript when the document is absent, unreadable,
    /// or malformed; the latter two log a warning.
    pub fn load(&self) -> Transcript {
        if !self.path.exists() {
            return Vec::new();
        }
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read transcript; starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(turns) => turns,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed transcript; starting empty");
                Vec::new()
            }
        }
    }
}
