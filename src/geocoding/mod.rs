//! # Geocoding
//!
//! Resolves postal codes and street addresses to coordinates.
//!
//! The provider is consumed through the [`Geocoder`] trait so operations never
//! see which service answered. Two providers ship with the crate:
//!
//! - [`MapQuestGeocoder`] - HTTP lookups against the MapQuest geocoding API
//! - [`FixedGeocoder`] - an in-memory table, for offline runs and tests

pub mod errors;
pub mod fixed;
pub mod geo;
pub mod mapquest;

use async_trait::async_trait;

pub use errors::{GeocodeError, GeocodeResult};
pub use fixed::FixedGeocoder;
pub use geo::{angular_distance, radius_radians, Coordinates, EARTH_RADIUS_KM};
pub use mapquest::MapQuestGeocoder;

/// A resolved location
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub coordinates: Coordinates,
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl Location {
    /// Location carrying only coordinates
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Coordinates::new(latitude, longitude),
            ..Default::default()
        }
    }
}

/// Address/postal code to coordinates service
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-form query (postal code or address) to its best match
    async fn geocode(&self, query: &str) -> GeocodeResult<Location>;
}
