//! MapQuest geocoder against a mock HTTP server.

use bootcamp_directory::geocoding::{Coordinates, GeocodeError, Geocoder, MapQuestGeocoder};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_geocode_postal_code() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/geocoding/v1/address")
            .query_param("key", "test-key")
            .query_param("location", "90210");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "results": [{
                    "locations": [{
                        "latLng": {"lat": 34.09, "lng": -118.40},
                        "street": "",
                        "adminArea5": "Beverly Hills",
                        "adminArea3": "CA",
                        "postalCode": "90210",
                        "adminArea1": "US"
                    }]
                }]
            }));
    });

    let geocoder = MapQuestGeocoder::with_base_url("test-key", &server.base_url()).unwrap();
    let location = geocoder.geocode("90210").await.unwrap();

    mock.assert();
    assert_eq!(location.coordinates, Coordinates::new(34.09, -118.40));
    assert_eq!(location.street, None);
    assert_eq!(location.city.as_deref(), Some("Beverly Hills"));
    assert_eq!(location.zipcode.as_deref(), Some("90210"));
    assert_eq!(
        location.formatted_address.as_deref(),
        Some("Beverly Hills, CA, 90210, US")
    );
}

#[tokio::test]
async fn test_no_locations_is_no_match() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/geocoding/v1/address");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"results": [{"locations": []}]}));
    });

    let geocoder = MapQuestGeocoder::with_base_url("test-key", &server.base_url()).unwrap();
    let result = geocoder.geocode("00000").await;

    assert!(matches!(result, Err(GeocodeError::NoMatch(q)) if q == "00000"));
}

#[tokio::test]
async fn test_provider_error_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/geocoding/v1/address");
        then.status(403).body("The AppKey submitted with this request is invalid.");
    });

    let geocoder = MapQuestGeocoder::with_base_url("bad-key", &server.base_url()).unwrap();
    let result = geocoder.geocode("90210").await;

    assert!(matches!(result, Err(GeocodeError::Provider(_))));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/proxy/geocoding/v1/address");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "results": [{"locations": [{"latLng": {"lat": 42.35, "lng": -71.1}}]}]
            }));
    });

    let geocoder = MapQuestGeocoder::with_base_url("test-key", &server.url("/proxy")).unwrap();
    let location = geocoder.geocode("02215").await.unwrap();

    mock.assert();
    assert_eq!(location.coordinates, Coordinates::new(42.35, -71.1));
}
