//! Router setup with all routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Upper bound for multipart uploads; per-file limits are enforced by the
/// report store against the configured maximum.
const UPLOAD_BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::ui))
        .route("/health", get(handlers::health))
        .route("/api/transcript", get(handlers::transcript))
        .route("/api/chat", post(handlers::chat))
        .route("/api/voice/listen", post(handlers::listen))
        .route(
            "/api/reports/analyze",
            post(handlers::analyze_report).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/clinics", get(handlers::clinics))
        .route("/api/directions", get(handlers::directions))
        .route("/api/appointments", post(handlers::save_appointment))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
