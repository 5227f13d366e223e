//! The session orchestrator: one explicit object per user session.
//!
//! Every service handle is a required constructor field, so a constructed
//! session is always fully wired. Each user action maps to one handler
//! method; there is no shared dispatch loop and no mode flag to check
//! before use. The chat path is the only one gated by the cooldown and
//! the only one that touches the transcript.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{info, warn};

use salus_chat::{apologetic_message, ConversationEngine};
use salus_core::{ChatTurn, Clinic, Role, RouteSummary, Transcript, UploadedFileRecord};
use salus_document::DocumentProcessor;
use salus_location::HealthcareFinder;
use salus_store::{AppointmentStore, ReportStore, TranscriptStore};

use crate::error::SessionError;

/// Sink for spoken replies. Implementations must never fail loudly;
/// playback problems are their own to log.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str);
}

/// The service handles a session is built from.
pub struct SessionServices {
    pub engine: ConversationEngine,
    pub documents: DocumentProcessor,
    pub finder: Arc<dyn HealthcareFinder>,
    pub speaker: Option<Arc<dyn Speaker>>,
    pub transcripts: TranscriptStore,
    pub appointments: AppointmentStore,
    pub reports: ReportStore,
}

/// Tunables lifted from configuration at construction time.
pub struct SessionSettings {
    pub cooldown_secs: u64,
    pub radius_m: u32,
    pub category: String,
}

/// One accepted chat interaction: the user turn and the assistant turn
/// appended for it.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub user: ChatTurn,
    pub assistant: ChatTurn,
}

/// Per-session state and handlers.
pub struct Session {
    engine: ConversationEngine,
    documents: DocumentProcessor,
    finder: Arc<dyn HealthcareFinder>,
    speaker: Option<Arc<dyn Speaker>>,
    transcripts: TranscriptStore,
    appointments: AppointmentStore,
    reports: ReportStore,
    transcript: Transcript,
    uploaded_files: Vec<UploadedFileRecord>,
    cooldown: Duration,
    last_accepted: Option<Instant>,
    radius_m: u32,
    category: String,
}

impl Session {
    /// Build a session, preloading the transcript from storage. An absent
    /// or damaged transcript document starts the session empty.
    pub fn new(services: SessionServices, settings: SessionSettings) -> Self {
        let transcript = services.transcripts.load();
        info!(turns = transcript.len(), "Session started");
        Self {
            engine: services.engine,
            documents: services.documents,
            finder: services.finder,
            speaker: services.speaker,
            transcripts: services.transcripts,
            appointments: services.appointments,
            reports: services.reports,
            transcript,
            uploaded_files: Vec::new(),
            cooldown: Duration::from_secs(settings.cooldown_secs),
            last_accepted: None,
            radius_m: settings.radius_m,
            category: settings.category,
        }
    }

    /// The cumulative displayed history.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    /// Files uploaded during this session.
    pub fn uploaded_files(&self) -> &[UploadedFileRecord] {
        &self.uploaded_files
    }

    /// Handle one chat submission (typed or transcribed).
    ///
    /// A submission inside the cooldown window is rejected with the wait
    /// time and discarded; the caller must resubmit. An accepted
    /// submission appends the user turn, obtains the assistant reply
    /// (falling back to an apologetic message on engine failure so the
    /// session never drops a turn), persists the full transcript, and
    /// optionally speaks the reply.
    pub async fn submit_chat(
        &mut self,
        text: &str,
        speak: bool,
    ) -> Result<ChatExchange, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        if let Some(last) = self.last_accepted {
            let elapsed = last.elapsed();
            if elapsed < self.cooldown {
                let wait_secs = (self.cooldown - elapsed).as_secs().max(1);
                return Err(SessionError::CoolingDown { wait_secs });
            }
        }

        let user = ChatTurn::new(Role::User, text);
        let reply = match self.engine.respond(text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Conversation engine failed; replying with fallback");
                apologetic_message(&e)
            }
        };
        let assistant = ChatTurn::new(Role::Assistant, reply.clone());

        self.transcript.push(user.clone());
        self.transcript.push(assistant.clone());
        if let Err(e) = self.transcripts.save(&self.transcript) {
            warn!(error = %e, "Failed to persist transcript");
        }

        if speak {
            if let Some(speaker) = &self.speaker {
                speaker.speak(&reply).await;
            }
        }

        self.last_accepted = Some(Instant::now());
        Ok(ChatExchange { user, assistant })
    }

    /// Store an uploaded report and remember it for this session.
    pub fn store_report(
        &mut self,
        name: &str,
        bytes: &[u8],
    ) -> Result<UploadedFileRecord, SessionError> {
        let record = self.reports.save(name, bytes)?;
        self.uploaded_files.push(record.clone());
        Ok(record)
    }

    /// Ingest a stored report and run the one-shot lab analysis.
    ///
    /// Bypasses the cooldown and the transcript entirely; the result is
    /// displayed but never persisted as chat history.
    pub async fn analyze_report(&self, path: &Path) -> Result<String, SessionError> {
        let text = self.documents.process(path)?;
        let analysis = self.engine.analyze_lab_report(&text).await?;
        Ok(analysis)
    }

    /// Find healthcare facilities near a free-text location. No chat turn
    /// is recorded.
    pub async fn find_clinics(&self, location: &str) -> Result<Vec<Clinic>, SessionError> {
        self.find_clinics_within(location, self.radius_m).await
    }

    /// Same as [`Session::find_clinics`] with an explicit search radius.
    pub async fn find_clinics_within(
        &self,
        location: &str,
        radius_m: u32,
    ) -> Result<Vec<Clinic>, SessionError> {
        let clinics = self
            .finder
            .find_nearby_healthcare(location, radius_m, &self.category)
            .await?;
        Ok(clinics)
    }

    /// Driving directions between two free-text locations.
    pub async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteSummary, SessionError> {
        let route = self.finder.get_directions(origin, destination).await?;
        Ok(route)
    }

    /// Persist one appointment document.
    pub fn save_appointment(&self, data: &serde_json::Value) -> Result<PathBuf, SessionError> {
        let path = self.appointments.save(data)?;
        Ok(path)
    }
}
