//! Route handler functions, one per mode/action.
//!
//! Handlers lock the single session, invoke the matching orchestrator
//! handler, and shape the outcome as JSON. Error mapping lives in
//! [`crate::error::ApiError`]; nothing raised here ends the session.

use axum::extract::{Multipart, Query, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use salus_core::{Clinic, RouteSummary, UploadedFileRecord};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request/response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Speak the reply aloud after responding.
    #[serde(default)]
    pub speak: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub file: UploadedFileRecord,
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct ListenResponse {
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct ClinicsParams {
    pub location: String,
    pub radius: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsParams {
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub saved: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET / - the single-page UI.
pub async fn ui() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /health - liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /api/transcript - the cumulative displayed history.
pub async fn transcript(State(state): State<AppState>) -> Json<Vec<salus_core::ChatTurn>> {
    let session = state.session.lock().await;
    Json(session.transcript().to_vec())
}

/// POST /api/chat - one chat submission.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let exchange = session.submit_chat(&request.message, request.speak).await?;
    Ok(Json(ChatResponse {
        reply: exchange.assistant.content,
        timestamp: exchange.assistant.timestamp,
    }))
}

/// POST /api/voice/listen - capture and transcribe one utterance.
pub async fn listen(State(state): State<AppState>) -> Result<Json<ListenResponse>, ApiError> {
    let transcript = state.voice.listen().await?;
    Ok(Json(ListenResponse { transcript }))
}

/// POST /api/reports/analyze - upload a lab report and analyze it.
pub async fn analyze_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        upload = Some((name, bytes.to_vec()));
        break;
    }

    let (name, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("no file in upload".to_string()))?;

    let mut session = state.session.lock().await;
    let record = session.store_report(&name, &bytes)?;
    info!(file = %record.name, "Report uploaded");

    let analysis = session
        .analyze_report(std::path::Path::new(&record.path))
        .await?;
    Ok(Json(AnalysisResponse {
        file: record,
        analysis,
    }))
}

/// GET /api/clinics - nearby healthcare facilities.
pub async fn clinics(
    State(state): State<AppState>,
    Query(params): Query<ClinicsParams>,
) -> Result<Json<Vec<Clinic>>, ApiError> {
    let session = state.session.lock().await;
    let clinics = match params.radius {
        Some(radius) => session.find_clinics_within(&params.location, radius).await?,
        None => session.find_clinics(&params.location).await?,
    };
    Ok(Json(clinics))
}

/// GET /api/directions - driving route between two locations.
pub async fn directions(
    State(state): State<AppState>,
    Query(params): Query<DirectionsParams>,
) -> Result<Json<RouteSummary>, ApiError> {
    let session = state.session.lock().await;
    let route = session
        .directions(&params.origin, &params.destination)
        .await?;
    Ok(Json(route))
}

/// POST /api/appointments - persist one appointment document.
pub async fn save_appointment(
    State(state): State<AppState>,
    Json(appointment): Json<serde_json::Value>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let session = state.session.lock().await;
    let path = session.save_appointment(&appointment)?;
    Ok(Json(AppointmentResponse {
        saved: path.to_string_lossy().to_string(),
    }))
}
