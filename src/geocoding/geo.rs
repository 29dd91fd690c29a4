//! # Spherical Geometry
//!
//! Coordinates and the angular-distance math behind radius searches.

use serde::{Deserialize, Serialize};

/// Earth radius used to turn a search distance into an angular radius.
///
/// This is the radius in kilometres while the radius route takes its distance
/// in miles. The pairing is kept as-is so search results match existing
/// clients; a distance of 10 therefore covers roughly 10 km, not 10 miles.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Angular radius (radians) of a spherical cap for the given search distance
pub fn radius_radians(distance: f64) -> f64 {
    distance / EARTH_RADIUS_KM
}

/// Great-circle angle (radians) between two points, haversine form
pub fn angular_distance(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = lat_b - lat_a;
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}
