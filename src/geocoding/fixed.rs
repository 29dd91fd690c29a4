//! # Fixed Geocoder
//!
//! Lookup-table geocoder. Queries are matched after trimming and lowercasing.

use std::collections::HashMap;

use async_trait::async_trait;

use super::errors::{GeocodeError, GeocodeResult};
use super::{Geocoder, Location};

/// Geocoder answering from a fixed table
#[derive(Debug, Clone, Default)]
pub struct FixedGeocoder {
    entries: HashMap<String, Location>,
}

impl FixedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style
    pub fn with(mut self, query: &str, location: Location) -> Self {
        self.insert(query, location);
        self
    }

    /// Add or replace an entry
    pub fn insert(&mut self, query: &str, location: Location) {
        self.entries.insert(normalize(query), location);
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, query: &str) -> GeocodeResult<Location> {
        self.entries
            .get(&normalize(query))
            .cloned()
            .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))
    }
}
