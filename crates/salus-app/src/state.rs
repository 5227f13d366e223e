//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use salus_session::Session;
use salus_voice::VoiceAssistant;

/// Shared application state.
///
/// The session is a single logical actor: all handlers serialize through
/// one async mutex, so no handler observes another's half-finished
/// interaction.
#[derive(Clone)]
pub struct AppState {
    /// The one interactive session this process serves.
    pub session: Arc<Mutex<Session>>,
    /// Voice input; `listen` is served directly from here.
    pub voice: Arc<VoiceAssistant>,
    /// Server start time for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(session: Session, voice: Arc<VoiceAssistant>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            voice,
            start_time: Instant::now(),
        }
    }
}
