//! Salus session crate - the interactive orchestrator.
//!
//! Owns the per-session state (transcript, upload list, cooldown clock)
//! and exposes one handler per user action: chat submission, report
//! analysis, clinic search, directions, appointment save. All external
//! services arrive as constructor fields; there is nothing to lazily
//! initialize and nothing to re-check before use.

pub mod error;
pub mod session;

pub use error::SessionError;
pub use session::{ChatExchange, Session, SessionServices, SessionSettings, Speaker};
