//! Free-text geocoding against a Pelias-compatible search API.
//!
//! # API
//!
//! `GET {endpoint}?text={query}&size={n}&api_key={key}`
//!
//! The response is a GeoJSON `FeatureCollection`. Only the first feature is
//! used; its geometry is a `Point` in `[lon, lat]` order.
//!
//! ```json
//! {
//!   "type": "FeatureCollection",
//!   "features": [
//!     { "geometry": { "type": "Point", "coordinates": [-122.20, 47.67] },
//!       "properties": { "label": "Kirkland, WA, USA" } }
//!   ]
//! }
//! ```

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::build_url;
use super::{AsyncHttpClient, ProviderError};
use crate::coord::{CoordError, Coordinate};

/// Default Pelias search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://api.geocode.earth/v1/search";

/// Errors that can occur while geocoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// Search text was empty or whitespace.
    #[error("Search text is empty")]
    EmptyQuery,

    /// The service returned no candidates.
    #[error("No location found for '{query}'")]
    EmptyResult { query: String },

    /// The first candidate carries an unusable coordinate.
    #[error("Geocoder returned an invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordError),

    /// Transport or parse failure.
    #[error("Geocoding request failed: {0}")]
    Provider(#[from] ProviderError),
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Where the place is.
    pub coordinate: Coordinate,
    /// Human-readable name, when the service provides one.
    pub label: Option<String>,
}

/// Converts free text into a single location.
pub trait Geocoder: Send + Sync {
    /// Resolves `text` to the best matching place.
    ///
    /// Must fail with [`GeocodeError::EmptyResult`] rather than invent a
    /// location when nothing matches.
    fn search(&self, text: &str) -> impl Future<Output = Result<Place, GeocodeError>> + Send;

    /// Display name of the service.
    fn name(&self) -> &str;
}

/// Search endpoint configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Full search endpoint URL.
    pub url: String,
    /// API key appended as `api_key`, if the service needs one.
    pub api_key: Option<String>,
    /// Number of candidates requested. Only the first is used.
    pub size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.to_string(),
            api_key: None,
            size: 1,
        }
    }
}

impl SearchConfig {
    /// Set the endpoint URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the number of requested candidates (at least 1).
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    features: Vec<SearchFeature>,
}

#[derive(Debug, Deserialize)]
struct SearchFeature {
    geometry: PointGeometry,
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    label: Option<String>,
}

/// Pelias (Mapzen Search) geocoder.
pub struct PeliasGeocoder<C: AsyncHttpClient> {
    http_client: C,
    config: SearchConfig,
}

impl<C: AsyncHttpClient> PeliasGeocoder<C> {
    /// Creates a geocoder for the given endpoint configuration.
    pub fn new(http_client: C, config: SearchConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Builds the search URL for `text`.
    fn build_url(&self, text: &str) -> Result<String, ProviderError> {
        let size = self.config.size.to_string();
        let mut params = vec![("text", text), ("size", size.as_str())];
        if let Some(key) = &self.config.api_key {
            params.push(("api_key", key.as_str()));
        }
        build_url(&self.config.url, &params)
    }
}

impl<C: AsyncHttpClient> Geocoder for PeliasGeocoder<C> {
    async fn search(&self, text: &str) -> Result<Place, GeocodeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let url = self.build_url(text)?;
        let body = self.http_client.get(&url).await?;
        let response: SearchResponse =
            serde_json::from_slice(&body).map_err(ProviderError::from)?;

        debug!(query = text, candidates = response.features.len(), "Search response");

        let Some(first) = response.features.into_iter().next() else {
            warn!(query = text, "Search returned no candidates");
            return Err(GeocodeError::EmptyResult {
                query: text.to_string(),
            });
        };

        let coordinate = Coordinate::from_lon_lat(first.geometry.coordinates);
        coordinate.validate()?;

        Ok(Place {
            coordinate,
            label: first.properties.label,
        })
    }

    fn name(&self) -> &str {
        "Pelias"
    }
}
