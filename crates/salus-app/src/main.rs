//! Salus application binary - composition root.
//!
//! Ties together all Salus crates into a single executable:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Read API credentials from the environment (fatal if missing)
//! 3. Construct every service wrapper and the session orchestrator
//! 4. Serve the single-page UI and one route per mode/action

use std::sync::Arc;

use async_trait::async_trait;

use salus_chat::{ConversationEngine, GeminiClient};
use salus_core::{Credentials, SalusConfig};
use salus_document::DocumentProcessor;
use salus_location::MapsClient;
use salus_session::{Session, SessionServices, SessionSettings, Speaker};
use salus_store::{AppointmentStore, ReportStore, TranscriptStore};
use salus_voice::VoiceAssistant;

mod cli;
mod error;
mod handlers;
mod routes;
mod state;

use clap::Parser;
use cli::CliArgs;
use state::AppState;

/// Adapter handing session speech requests to the voice assistant.
struct VoiceSpeaker(Arc<VoiceAssistant>);

#[async_trait]
impl Speaker for VoiceSpeaker {
    async fn speak(&self, text: &str) {
        self.0.speak(text).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first; the log level may come from it.
    let config_path = args.resolve_config_path();
    let mut config = SalusConfig::load_or_default(&config_path);
    if let Some(data_dir) = args.resolve_data_dir() {
        config.general.data_dir = data_dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Salus v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_path.display(), "Configuration loaded");

    // Credentials. Component initialization is the one fatal path: a
    // missing key halts startup before anything is served.
    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Cannot start without API credentials");
            return Err(e.into());
        }
    };

    let data_dir = cli::resolve_data_dir(&config.general.data_dir);
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }
    tracing::info!(path = %data_dir.display(), "Data directory ready");

    // Service wrappers.
    let backend = Arc::new(GeminiClient::new(
        credentials.gemini_api_key.clone(),
        config.chat.model.clone(),
    ));
    let engine = ConversationEngine::new(backend);
    let documents = DocumentProcessor::with_tesseract();
    let finder = Arc::new(MapsClient::new(credentials.maps_api_key.clone()));
    let voice = VoiceAssistant::new(&credentials.gemini_api_key, &config.voice, &data_dir);
    if !voice.is_available() {
        tracing::info!("Voice input unavailable on this build; spoken replies still work");
    }
    let voice = Arc::new(voice);

    // Session orchestrator, preloading any persisted transcript.
    let services = SessionServices {
        engine,
        documents,
        finder,
        speaker: Some(Arc::new(VoiceSpeaker(Arc::clone(&voice)))),
        transcripts: TranscriptStore::new(&data_dir),
        appointments: AppointmentStore::new(&data_dir),
        reports: ReportStore::new(
            &data_dir,
            config.upload.max_size_bytes,
            config.upload.allowed_extensions.clone(),
        ),
    };
    let settings = SessionSettings {
        cooldown_secs: config.chat.cooldown_secs,
        radius_m: config.location.radius_m,
        category: config.location.category.clone(),
    };
    let session = Session::new(services, settings);

    let state = AppState::new(session, voice);

    // HTTP server.
    let port = args.resolve_port();
    let addr = format!("127.0.0.1:{}", port);
    let router = routes::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind — is another instance running?");
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "Salus listening");
    tracing::info!("UI at http://{}/", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
