//! Application error types.

use thiserror::Error;

use crate::polyline::PolylineError;
use crate::provider::{GeocodeError, GeolocationError, RouteError};

/// Errors surfaced to the user by the route controller.
///
/// Every variant is a user-visible condition. None of them leave the
/// controller unusable: the user can fix the input and try again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// The environment cannot supply a position.
    #[error("Unable to access geolocation: {0}")]
    GeolocationUnavailable(GeolocationError),

    /// A route was requested before any position was known.
    #[error("Current position is not known; set an origin first")]
    NoOrigin,

    /// The destination text is empty.
    #[error("Enter a destination")]
    EmptyDestination,

    /// The search text matched nothing.
    #[error("No location found for '{query}'")]
    GeocodeEmptyResult { query: String },

    /// The search request failed.
    #[error("Geocoding failed: {0}")]
    GeocodeFailed(GeocodeError),

    /// The routing request failed or returned no legs.
    #[error("Route request failed: {0}")]
    RouteRequestFailed(RouteError),

    /// The route shape could not be decoded.
    #[error("Route shape is malformed: {0}")]
    MalformedPolyline(#[from] PolylineError),
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::EmptyQuery => AppError::EmptyDestination,
            GeocodeError::EmptyResult { query } => AppError::GeocodeEmptyResult { query },
            other => AppError::GeocodeFailed(other),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::RouteRequestFailed(e)
    }
}

impl From<GeolocationError> for AppError {
    fn from(e: GeolocationError) -> Self {
        AppError::GeolocationUnavailable(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;

    #[test]
    fn test_app_error_display() {
        let err = AppError::GeocodeEmptyResult {
            query: "atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "No location found for 'atlantis'");
    }

    #[test]
    fn test_empty_result_maps_to_dedicated_variant() {
        let err: AppError = GeocodeError::EmptyResult {
            query: "x".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::GeocodeEmptyResult { .. }));
    }

    #[test]
    fn test_empty_query_maps_to_empty_destination() {
        let err: AppError = GeocodeError::EmptyQuery.into();
        assert_eq!(err, AppError::EmptyDestination);
    }

    #[test]
    fn test_provider_failure_maps_to_geocode_failed() {
        let err: AppError =
            GeocodeError::Provider(ProviderError::HttpError("HTTP 500".to_string())).into();
        assert!(matches!(err, AppError::GeocodeFailed(_)));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_route_error_maps_to_route_request_failed() {
        let err: AppError = RouteError::NoLegs.into();
        assert!(matches!(err, AppError::RouteRequestFailed(RouteError::NoLegs)));
    }

    #[test]
    fn test_polyline_error_maps_to_malformed() {
        let err: AppError = PolylineError::UnexpectedEnd { position: 4 }.into();
        assert!(matches!(err, AppError::MalformedPolyline(_)));
    }
}
