//! # Geocoding Errors

use thiserror::Error;

/// Result type for geocoding lookups
pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Geocoding errors
#[derive(Debug, Clone, Error)]
pub enum GeocodeError {
    /// The provider answered but had no match for the query
    #[error("No location found for '{0}'")]
    NoMatch(String),

    /// Transport, status or decoding failure talking to the provider
    #[error("Geocoding provider error: {0}")]
    Provider(String),

    /// Provider configuration is unusable
    #[error("Geocoder misconfigured: {0}")]
    Misconfigured(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Provider(err.to_string())
    }
}
