//! Shared domain types for the Salus assistant.
//!
//! These types cross crate boundaries: chat turns flow between the session
//! orchestrator and the persistence store, clinics between location lookup
//! and the HTTP surface.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used for chat turns and upload records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    /// Wall-clock time of creation, formatted as [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl ChatTurn {
    /// Create a turn stamped with the current local time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: now_timestamp(),
        }
    }
}

/// Ordered sequence of chat turns for one session.
pub type Transcript = Vec<ChatTurn>;

/// A file uploaded during the active session. Kept in memory only; never
/// persisted alongside the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileRecord {
    pub name: String,
    pub path: String,
    pub timestamp: String,
}

/// A healthcare facility returned by location lookup. Constructed fresh per
/// lookup; not cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clinic {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<Vec<String>>,
}

/// One step of a driving route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
}

/// A driving route flattened to totals plus ordered step instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_distance: String,
    pub total_duration: String,
    pub steps: Vec<RouteStep>,
}

/// Current local time formatted as [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Re-format a stored timestamp for display (12-hour clock).
///
/// Input that does not match [`TIMESTAMP_FORMAT`] is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    match NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) {
        Ok(dt) => dt.format("%I:%M %p").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
