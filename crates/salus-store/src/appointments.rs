//! Appointment persistence: one timestamp-named JSON file per save.
//!
//! Append-only by construction; there is no update or delete path.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::StoreError;

/// Filename timestamp format: `appointment_<YYYYMMDD_HHMMSS>.json`.
const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File-backed appointment store.
pub struct AppointmentStore {
    dir: PathBuf,
}

impl AppointmentStore {
    /// Store rooted at `<data_dir>/appointments/`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("appointments"),
        }
    }

    /// The directory appointments are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one appointment as a pretty-printed JSON document named by the
    /// current local time. Returns the path written.
    pub fn save(&self, appointment: &serde_json::Value) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let stamp = Local::now().format(FILENAME_TIMESTAMP_FORMAT);
        let path = self.dir.join(format!("appointment_{}.json", stamp));
        let json = serde_json::to_string_pretty(appointment)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
