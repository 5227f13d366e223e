//! HTTP client for the maps/places web services.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use salus_core::{Clinic, RouteSummary};

use crate::error::LocationError;
use crate::wire::{
    assemble_clinic, best_coordinate, flatten_route, DirectionsResponse, GeocodeResponse,
    LatLng, PlaceDetailsResponse, PlacesNearbyResponse,
};
use crate::HealthcareFinder;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Place-details fields requested for each hit; nothing else is fetched.
const DETAILS_FIELDS: &str =
    "name,formatted_address,rating,opening_hours,website,formatted_phone_number";

/// Client for geocoding, nearby search, place details, and directions.
pub struct MapsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MapsClient {
    /// Client against the production maps endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint root. Used by tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a free-text location to its single best coordinate pair.
    pub async fn geocode(&self, location: &str) -> Result<LatLng, LocationError> {
        let url = format!("{}/geocode/json", self.base_url);
        let response: GeocodeResponse = self
            .client
            .get(url)
            .query(&[("address", location), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))?;

        best_coordinate(response)
    }

    async fn places_nearby(
        &self,
        at: LatLng,
        radius_m: u32,
        category: &str,
    ) -> Result<PlacesNearbyResponse, LocationError> {
        let url = format!("{}/place/nearbysearch/json", self.base_url);
        let location = format!("{},{}", at.lat, at.lng);
        let radius = radius_m.to_string();
        let response: PlacesNearbyResponse = self
            .client
            .get(url)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", category),
                ("keyword", "healthcare"),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(response),
            other => Err(LocationError::Api {
                status: other.to_string(),
                message: "nearby search failed".to_string(),
            }),
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse, LocationError> {
        let url = format!("{}/place/details/json", self.base_url);
        self.client
            .get(url)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAILS_FIELDS),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))
    }
}

#[async_trait]
impl HealthcareFinder for MapsClient {
    async fn find_nearby_healthcare(
        &self,
        location: &str,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Clinic>, LocationError> {
        // A failed geocode returns before any places query is issued.
        let at = self.geocode(location).await?;
        debug!(lat = at.lat, lng = at.lng, "Geocoded location");

        let nearby = self.places_nearby(at, radius_m, category).await?;

        let mut clinics = Vec::with_capacity(nearby.results.len());
        for place in nearby.results {
            let details = self.place_details(&place.place_id).await?;
            clinics.push(assemble_clinic(details.result.unwrap_or_default()));
        }

        info!(count = clinics.len(), "Clinic lookup complete");
        Ok(clinics)
    }

    async fn get_directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteSummary, LocationError> {
        let url = format!("{}/directions/json", self.base_url);
        let response: DirectionsResponse = self
            .client
            .get(url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| LocationError::Request(e.to_string()))?;

        flatten_route(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_overrides_endpoint_root() {
        let client = MapsClient::new("key").with_base_url("http://127.0.0.1:9/maps");
        assert_eq!(client.base_url, "http://127.0.0.1:9/maps");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        // Port 9 (discard) refuses connections; the error must surface as
        // a typed request failure, not a panic.
        let client = MapsClient::new("key").with_base_url("http://127.0.0.1:9/maps");
        let err = client.geocode("Springfield").await.unwrap_err();
        assert!(matches!(err, LocationError::Request(_)));
    }
}
