//! Error types for the session orchestrator.

use salus_chat::ChatError;
use salus_document::DocumentError;
use salus_location::LocationError;
use salus_store::StoreError;

/// Errors surfaced by session handlers.
///
/// Subsystem errors pass through transparently so their descriptive
/// messages reach the boundary unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("please wait {wait_secs} seconds before sending another message")]
    CoolingDown { wait_secs: u64 },
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
