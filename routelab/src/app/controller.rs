//! The route controller: origin tracking and the geocode → route → decode
//! pipeline.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::error::AppError;
use super::state::{format_step, AppState, PositionState, RouteLayers};
use crate::coord::{Bounds, Coordinate};
use crate::map::{
    route_feature_collection, CircleMarker, FeatureCollection, Layer, MapView, DESTINATION_COLOR,
    ORIGIN_COLOR,
};
use crate::polyline;
use crate::provider::{
    GeolocationError, GeolocationProvider, Geocoder, Place, RouteError, Router, Summary,
};

/// Zoom used when centering on the user's position.
pub const ORIGIN_ZOOM: u8 = 14;

/// Default time allowed for a position fix.
pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a successful route calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub origin: Coordinate,
    pub destination: Place,
    /// Decoded route shape in `[lat, lon]` order.
    pub points: Vec<Coordinate>,
    /// The route line as GeoJSON, positions in `[lon, lat]` order.
    pub geojson: FeatureCollection,
    /// Numbered maneuver list, e.g. `"Step 1: Head north"`.
    pub steps: Vec<String>,
    pub summary: Option<Summary>,
}

/// Owns the application state and drives the map.
///
/// Origin acquisition and route calculation are separate user-level
/// actions. A calculation runs its stages strictly in order, stopping at the
/// first failure:
///
/// ```text
/// validate text ─► origin known? ─► geocode ─► route(origin, dest) ─► decode ─► render
/// ```
///
/// The route request is never issued without a resolved destination.
pub struct RouteController<G, R, M> {
    geocoder: G,
    router: R,
    map: M,
    state: AppState,
}

impl<G, R, M> RouteController<G, R, M>
where
    G: Geocoder,
    R: Router,
    M: MapView,
{
    pub fn new(geocoder: G, router: R, map: M) -> Self {
        Self {
            geocoder,
            router,
            map,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Consumes the controller, returning the map with everything drawn.
    pub fn into_map(self) -> M {
        self.map
    }

    /// Whether `text` is acceptable as a destination.
    pub fn can_calculate(text: &str) -> bool {
        !text.trim().is_empty()
    }

    /// Acquires one position fix from `provider` and applies it.
    ///
    /// On failure the state is left as it was, so a previously known origin
    /// stays usable.
    pub async fn locate<P: GeolocationProvider>(
        &mut self,
        provider: &P,
        timeout: Duration,
    ) -> Result<Coordinate, AppError> {
        let fix = tokio::time::timeout(timeout, provider.current_position())
            .await
            .map_err(|_| GeolocationError::Timeout(timeout.as_secs()))
            .and_then(|result| result);

        match fix {
            Ok(position) => {
                info!(
                    source = provider.name(),
                    origin = %position.coordinate,
                    "Position acquired"
                );
                self.update_position(position.coordinate, position.timestamp);
                Ok(position.coordinate)
            }
            Err(e) => {
                warn!(source = provider.name(), error = %e, "Geolocation unavailable");
                Err(e.into())
            }
        }
    }

    /// Replaces the origin marker with one at `coordinate`.
    ///
    /// Only the first call centers the map; later calls just move the marker.
    pub fn update_position(&mut self, coordinate: Coordinate, updated: DateTime<Utc>) {
        if let Some(previous) = self.state.position.take() {
            self.map.remove_layer(previous.marker);
        }

        let marker = self.map.add_layer(Layer::Marker(
            CircleMarker::new(coordinate, ORIGIN_COLOR).with_title("Current position"),
        ));
        self.state.position = Some(PositionState {
            coordinate,
            updated,
            marker,
        });

        if !self.state.centered {
            self.map.fly_to(coordinate, ORIGIN_ZOOM);
            self.state.centered = true;
        }
    }

    /// Removes the displayed route and its step list.
    pub fn clear_route(&mut self) {
        if let Some(layers) = self.state.route.take() {
            self.map.remove_layer(layers.line);
            self.map.remove_layer(layers.destination);
        }
        self.state.steps.clear();
    }

    /// Geocodes `destination`, routes to it from the current origin and
    /// draws the result.
    ///
    /// # Arguments
    ///
    /// * `destination` - Free-text search, trimmed before use
    ///
    /// # Returns
    ///
    /// The drawn route and its directions. On failure the map keeps the
    /// previous route only if the input or origin was rejected.
    pub async fn calculate(&mut self, destination: &str) -> Result<RouteOutcome, AppError> {
        if !Self::can_calculate(destination) {
            return Err(AppError::EmptyDestination);
        }
        let origin = self.state.origin().ok_or(AppError::NoOrigin)?;

        self.clear_route();

        info!(query = destination.trim(), geocoder = self.geocoder.name(), "Geocoding destination");
        let place = self.geocoder.search(destination).await?;

        info!(
            origin = %origin,
            destination = %place.coordinate,
            router = self.router.name(),
            "Requesting route"
        );
        let trip = self.router.route(origin, place.coordinate).await?;
        let leg = trip
            .first_leg()
            .ok_or(AppError::RouteRequestFailed(RouteError::NoLegs))?;

        let points = polyline::decode(&leg.shape, self.router.shape_precision())?;
        let geojson = route_feature_collection(&points);
        let steps: Vec<String> = leg
            .maneuvers
            .iter()
            .enumerate()
            .map(|(i, m)| format_step(i, &m.instruction))
            .collect();

        let line = self.map.add_layer(Layer::GeoJson(geojson.clone()));
        let mut marker = CircleMarker::new(place.coordinate, DESTINATION_COLOR);
        if let Some(label) = &place.label {
            marker = marker.with_title(label.clone());
        }
        let destination_marker = self.map.add_layer(Layer::Marker(marker));
        self.map.fit_bounds(Bounds::from_corners(origin, place.coordinate));

        self.state.route = Some(RouteLayers {
            line,
            destination: destination_marker,
        });
        self.state.steps = steps.clone();

        info!(points = points.len(), steps = steps.len(), "Route rendered");

        Ok(RouteOutcome {
            origin,
            destination: place,
            points,
            geojson,
            steps,
            summary: leg.summary.or(trip.summary),
        })
    }
}
