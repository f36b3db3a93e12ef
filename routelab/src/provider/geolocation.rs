//! Current-position providers.
//!
//! A browser would ask the device for its position. A command-line tool has
//! no such sensor, so the origin comes from one of:
//!
//! - [`FixedLocation`]: a position given in the config file or on the
//!   command line,
//! - [`IpGeolocation`]: an IP-based lookup service returning JSON with
//!   `latitude`/`longitude` (or `lat`/`lon`) fields,
//! - [`NoGeolocation`]: always unavailable.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{AsyncHttpClient, ProviderError};
use crate::coord::{CoordError, Coordinate};

/// Default IP geolocation endpoint.
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

/// Errors that can occur while acquiring the current position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    /// No source of position is configured.
    #[error("Geolocation is unavailable: {0}")]
    Unavailable(String),

    /// The lookup did not finish in time.
    #[error("Geolocation timed out after {0}s")]
    Timeout(u64),

    /// The reported position is out of range.
    #[error("Geolocation returned an invalid position: {0}")]
    InvalidPosition(#[from] CoordError),

    /// Transport or parse failure.
    #[error("Geolocation request failed: {0}")]
    Provider(#[from] ProviderError),
}

/// A position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coordinate: Coordinate,
    /// When the fix was taken.
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// A fix taken now.
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: Utc::now(),
        }
    }
}

/// Supplies a one-time current position.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Position, GeolocationError>> + Send;

    /// Display name of the source.
    fn name(&self) -> &str;
}

/// A configured, constant position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinate: Coordinate,
}

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl GeolocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        self.coordinate.validate()?;
        Ok(Position::now(self.coordinate))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// A source that never has a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl GeolocationProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        Err(GeolocationError::Unavailable(
            "no origin configured and IP lookup disabled".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "none"
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
}

/// Position from an IP geolocation service.
pub struct IpGeolocation<C: AsyncHttpClient> {
    http_client: C,
    url: String,
}

impl<C: AsyncHttpClient> IpGeolocation<C> {
    pub fn new(http_client: C, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }
}

impl<C: AsyncHttpClient> GeolocationProvider for IpGeolocation<C> {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        let body = self.http_client.get(&self.url).await?;
        let response: IpLookupResponse =
            serde_json::from_slice(&body).map_err(ProviderError::from)?;

        let (Some(lat), Some(lon)) = (response.latitude, response.longitude) else {
            return Err(GeolocationError::Unavailable(
                "lookup response has no coordinates".to_string(),
            ));
        };

        let coordinate = Coordinate::new(lat, lon);
        coordinate.validate()?;
        debug!(%coordinate, "IP geolocation fix");

        Ok(Position::now(coordinate))
    }

    fn name(&self) -> &str {
        "ip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    #[tokio::test]
    async fn test_fixed_location() {
        let provider = FixedLocation::new(Coordinate::new(47.61, -122.33));
        let position = provider.current_position().await.unwrap();
        assert_eq!(position.coordinate, Coordinate::new(47.61, -122.33));
    }

    #[tokio::test]
    async fn test_fixed_location_out_of_range() {
        let provider = FixedLocation::new(Coordinate::new(147.61, -122.33));
        let result = provider.current_position().await;
        assert!(matches!(result, Err(GeolocationError::InvalidPosition(_))));
    }

    #[tokio::test]
    async fn test_no_geolocation() {
        let result = NoGeolocation.current_position().await;
        assert!(matches!(result, Err(GeolocationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_ip_lookup_latitude_longitude_fields() {
        let mock = MockAsyncHttpClient::with_body(
            r#"{"ip":"203.0.113.7","city":"Seattle","latitude":47.61,"longitude":-122.33}"#,
        );
        let provider = IpGeolocation::new(mock, "https://ip.example.com/json/");

        let position = provider.current_position().await.unwrap();
        assert_eq!(position.coordinate, Coordinate::new(47.61, -122.33));
        assert_eq!(
            provider.http_client.requested_urls(),
            vec!["https://ip.example.com/json/"]
        );
    }

    #[tokio::test]
    async fn test_ip_lookup_lat_lon_fields() {
        let mock = MockAsyncHttpClient::with_body(r#"{"status":"success","lat":51.5,"lon":-0.12}"#);
        let provider = IpGeolocation::new(mock, "https://ip.example.com/json/");

        let position = provider.current_position().await.unwrap();
        assert_eq!(position.coordinate, Coordinate::new(51.5, -0.12));
    }

    #[tokio::test]
    async fn test_ip_lookup_without_coordinates() {
        let mock = MockAsyncHttpClient::with_body(r#"{"error":true,"reason":"RateLimited"}"#);
        let provider = IpGeolocation::new(mock, "https://ip.example.com/json/");

        let result = provider.current_position().await;
        assert!(matches!(result, Err(GeolocationError::Unavailable(_))));
    }
}
