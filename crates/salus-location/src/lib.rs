//! Salus location crate - clinic lookup and driving directions.
//!
//! Wraps the maps/places web services behind the [`HealthcareFinder`]
//! trait: geocode a free-text location, search nearby healthcare
//! facilities, enrich each hit with place details, and flatten driving
//! routes into step lists.

pub mod client;
pub mod error;
pub mod wire;

pub use client::MapsClient;
pub use error::LocationError;

use async_trait::async_trait;
use salus_core::{Clinic, RouteSummary};

/// Clinic lookup and directions, abstracted for testing.
#[async_trait]
pub trait HealthcareFinder: Send + Sync {
    /// Geocode `location` and return nearby healthcare facilities.
    ///
    /// Result ordering is whatever the places provider returns.
    async fn find_nearby_healthcare(
        &self,
        location: &str,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Clinic>, LocationError>;

    /// Driving route between two free-text locations.
    async fn get_directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteSummary, LocationError>;
}
