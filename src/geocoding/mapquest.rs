//! # MapQuest Geocoder
//!
//! Forward geocoding through the MapQuest `geocoding/v1/address` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::errors::{GeocodeError, GeocodeResult};
use super::{Coordinates, Geocoder, Location};

/// Public MapQuest API root
pub const DEFAULT_BASE_URL: &str = "https://www.mapquestapi.com";

/// MapQuest-backed geocoder
#[derive(Debug, Clone)]
pub struct MapQuestGeocoder {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl MapQuestGeocoder {
    /// Create a geocoder against the public API
    pub fn new(api_key: impl Into<String>) -> GeocodeResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a geocoder against a custom API root
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> GeocodeResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeocodeError::Misconfigured("missing API key".to_string()));
        }

        let mut base_url = Url::parse(base_url)
            .map_err(|e| GeocodeError::Misconfigured(format!("invalid base URL: {}", e)))?;

        // `Url::join` replaces the last segment unless the path ends in `/`
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    fn endpoint(&self) -> GeocodeResult<Url> {
        self.base_url
            .join("geocoding/v1/address")
            .map_err(|e| GeocodeError::Misconfigured(e.to_string()))
    }
}

// ==================
// Wire Types
// ==================

#[derive(Debug, Deserialize)]
struct AddressResponse {
    #[serde(default)]
    results: Vec<AddressResult>,
}

#[derive(Debug, Deserialize)]
struct AddressResult {
    #[serde(default)]
    locations: Vec<MapQuestLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapQuestLocation {
    lat_lng: LatLng,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    admin_area5: Option<String>,
    #[serde(default)]
    admin_area3: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
    #[serde(default)]
    admin_area1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<MapQuestLocation> for Location {
    fn from(loc: MapQuestLocation) -> Self {
        let street = non_empty(loc.street);
        let city = non_empty(loc.admin_area5);
        let state = non_empty(loc.admin_area3);
        let zipcode = non_empty(loc.postal_code);
        let country = non_empty(loc.admin_area1);

        let parts: Vec<&str> = [&street, &city, &state, &zipcode, &country]
            .iter()
            .filter_map(|p| p.as_deref())
            .collect();
        let formatted_address = if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        };

        Location {
            coordinates: Coordinates::new(loc.lat_lng.lat, loc.lat_lng.lng),
            formatted_address,
            street,
            city,
            state,
            zipcode,
            country,
        }
    }
}

#[async_trait]
impl Geocoder for MapQuestGeocoder {
    async fn geocode(&self, query: &str) -> GeocodeResult<Location> {
        let response = self
            .client
            .get(self.endpoint()?)
            .query(&[("key", self.api_key.as_str()), ("location", query)])
            .send()
            .await?
            .error_for_status()?;

        let body: AddressResponse = response.json().await?;

        body.results
            .into_iter()
            .flat_map(|r| r.locations)
            .next()
            .map(Location::from)
            .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_key() {
        let result = MapQuestGeocoder::new("  ");
        assert!(matches!(result, Err(GeocodeError::Misconfigured(_))));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = MapQuestGeocoder::with_base_url("key", "not a url");
        assert!(matches!(result, Err(GeocodeError::Misconfigured(_))));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let geocoder = MapQuestGeocoder::with_base_url("key", "http://localhost:9000/proxy").unwrap();
        assert_eq!(
            geocoder.endpoint().unwrap().as_str(),
            "http://localhost:9000/proxy/geocoding/v1/address"
        );

        let geocoder = MapQuestGeocoder::with_base_url("key", "http://localhost:9000/proxy/").unwrap();
        assert_eq!(
            geocoder.endpoint().unwrap().as_str(),
            "http://localhost:9000/proxy/geocoding/v1/address"
        );

        let geocoder = MapQuestGeocoder::new("key").unwrap();
        assert_eq!(
            geocoder.endpoint().unwrap().as_str(),
            "https://www.mapquestapi.com/geocoding/v1/address"
        );
    }

    #[test]
    fn test_location_conversion_formats_address() {
        let wire: MapQuestLocation = serde_json::from_value(serde_json::json!({
            "latLng": {"lat": 42.35, "lng": -71.06},
            "street": "233 Bay State Rd",
            "adminArea5": "Boston",
            "adminArea3": "MA",
            "postalCode": "02215",
            "adminArea1": "US"
        }))
        .unwrap();

        let location = Location::from(wire);
        assert_eq!(location.coordinates, Coordinates::new(42.35, -71.06));
        assert_eq!(location.city.as_deref(), Some("Boston"));
        assert_eq!(
            location.formatted_address.as_deref(),
            Some("233 Bay State Rd, Boston, MA, 02215, US")
        );
    }
}
