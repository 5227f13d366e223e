//! API error type and JSON error response formatting.
//!
//! Every failure becomes a descriptive message in a JSON body and the
//! session continues; nothing here aborts the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use salus_document::DocumentError;
use salus_location::LocationError;
use salus_session::SessionError;
use salus_store::StoreError;
use salus_voice::VoiceError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "slow_down").
    pub error: String,
    /// Human-readable message shown to the user.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid parameters.
    BadRequest(String),
    /// 404 Not Found - resource or location does not exist.
    NotFound(String),
    /// 422 Unprocessable Entity - valid syntax but unusable content.
    UnprocessableEntity(String),
    /// 429 Too Many Requests - cooldown window not yet elapsed.
    SlowDown(String),
    /// 500 Internal Server Error - unexpected server error.
    Internal(String),
    /// 503 Service Unavailable - optional capability not installed.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::UnprocessableEntity(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable_entity", msg)
            }
            ApiError::SlowDown(msg) => (StatusCode::TOO_MANY_REQUESTS, "slow_down", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::EmptyMessage => ApiError::BadRequest(message),
            SessionError::CoolingDown { .. } => ApiError::SlowDown(message),
            SessionError::Document(DocumentError::UnsupportedFormat(_)) => {
                ApiError::UnprocessableEntity(message)
            }
            SessionError::Document(DocumentError::OcrUnavailable) => {
                ApiError::ServiceUnavailable(message)
            }
            SessionError::Location(LocationError::LocationNotFound)
            | SessionError::Location(LocationError::NoDirections) => ApiError::NotFound(message),
            SessionError::Store(StoreError::FileTooLarge { .. })
            | SessionError::Store(StoreError::ExtensionNotAllowed(_))
            | SessionError::Store(StoreError::EmptyFilename) => ApiError::BadRequest(message),
            _ => ApiError::Internal(message),
        }
    }
}

impl From<VoiceError> for ApiError {
    fn from(err: VoiceError) -> Self {
        let message = err.to_string();
        match err {
            VoiceError::CaptureUnavailable => ApiError::ServiceUnavailable(message),
            VoiceError::Unrecognized => ApiError::UnprocessableEntity(message),
            _ => ApiError::Internal(message),
        }
    }
}
