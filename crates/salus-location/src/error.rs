//! Error types for location lookup.

use salus_core::SalusError;

/// Errors from geocoding, places search, and directions.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location not found; try again with a more specific address")]
    LocationNotFound,
    #[error("no directions found")]
    NoDirections,
    #[error("maps request failed: {0}")]
    Request(String),
    #[error("maps API error {status}: {message}")]
    Api { status: String, message: String },
}

impl From<LocationError> for SalusError {
    fn from(err: LocationError) -> Self {
        SalusError::Location(err.to_string())
    }
}
