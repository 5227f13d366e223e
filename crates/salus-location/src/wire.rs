//! Wire types for the maps/places web services, plus the pure
//! response-shaping helpers the client builds on.
//!
//! Keeping the shaping logic free of HTTP lets it be tested against
//! captured JSON payloads directly.

use serde::Deserialize;

use salus_core::{Clinic, RouteStep, RouteSummary};

use crate::error::LocationError;

// =============================================================================
// Geocoding
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Pick the single best coordinate from a geocoding response.
///
/// Zero results map to [`LocationError::LocationNotFound`]; any other
/// non-OK status is surfaced as a provider error.
pub fn best_coordinate(response: GeocodeResponse) -> Result<LatLng, LocationError> {
    match response.status.as_str() {
        "OK" => response
            .results
            .first()
            .map(|r| r.geometry.location)
            .ok_or(LocationError::LocationNotFound),
        "ZERO_RESULTS" => Err(LocationError::LocationNotFound),
        other => Err(LocationError::Api {
            status: other.to_string(),
            message: "geocoding failed".to_string(),
        }),
    }
}

// =============================================================================
// Places
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct PlacesNearbyResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    pub status: String,
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Option<Vec<String>>,
}

/// Assemble a [`Clinic`] from a details payload.
pub fn assemble_clinic(details: PlaceDetails) -> Clinic {
    Clinic {
        name: details.name.unwrap_or_default(),
        address: details.formatted_address.unwrap_or_default(),
        rating: details.rating,
        phone: details.formatted_phone_number,
        website: details.website,
        opening_hours: details.opening_hours.and_then(|h| h.weekday_text),
    }
}

// =============================================================================
// Directions
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
pub struct Leg {
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub html_instructions: String,
    pub distance: TextValue,
    pub duration: TextValue,
}

#[derive(Debug, Deserialize)]
pub struct TextValue {
    pub text: String,
}

/// Flatten the first returned route into totals plus ordered steps.
///
/// Totals come from the first leg; steps are collected across every leg in
/// order. Zero routes map to [`LocationError::NoDirections`].
pub fn flatten_route(response: DirectionsResponse) -> Result<RouteSummary, LocationError> {
    if response.status == "ZERO_RESULTS" || response.routes.is_empty() {
        return Err(LocationError::NoDirections);
    }
    if response.status != "OK" {
        return Err(LocationError::Api {
            status: response.status,
            message: "directions failed".to_string(),
        });
    }

    let route = &response.routes[0];
    let first_leg = route.legs.first().ok_or(LocationError::NoDirections)?;

    let steps = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .map(|step| RouteStep {
            instruction: step.html_instructions.clone(),
            distance: step.distance.text.clone(),
            duration: step.duration.text.clone(),
        })
        .collect();

    Ok(RouteSummary {
        total_distance: first_leg.distance.text.clone(),
        total_duration: first_leg.duration.text.clone(),
        steps,
    })
}
