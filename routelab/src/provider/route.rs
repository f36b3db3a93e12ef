//! Turn-by-turn routing against a Valhalla-compatible API.
//!
//! # API
//!
//! `GET {endpoint}?json={request}&api_key={key}` where `request` is:
//!
//! ```json
//! {
//!   "locations": [{"lat": 47.61, "lon": -122.33}, {"lat": 47.67, "lon": -122.20}],
//!   "costing": "auto",
//!   "directions_options": {"units": "miles"}
//! }
//! ```
//!
//! Location order matters: the first entry is the origin.
//!
//! The response holds a `trip` with one leg per pair of consecutive
//! locations. Each leg carries its geometry as an encoded polyline in
//! `shape` and a list of `maneuvers` with human-readable instructions.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::build_url;
use super::{AsyncHttpClient, ProviderError};
use crate::coord::Coordinate;

/// Default Valhalla optimized route endpoint.
pub const DEFAULT_ROUTE_URL: &str = "https://valhalla1.openstreetmap.de/optimized_route";

/// Errors that can occur while requesting a route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The response contained no trip or no legs.
    #[error("Routing service returned no route legs")]
    NoLegs,

    /// The service reported an error in its response body.
    #[error("Routing service error: {0}")]
    Service(String),

    /// Transport or parse failure.
    #[error("Routing request failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Travel mode used to cost the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Costing {
    /// Car.
    #[default]
    Auto,
    Bicycle,
    Pedestrian,
    Bus,
    Truck,
    MotorScooter,
}

impl Costing {
    /// Name as used by the routing API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Costing::Auto => "auto",
            Costing::Bicycle => "bicycle",
            Costing::Pedestrian => "pedestrian",
            Costing::Bus => "bus",
            Costing::Truck => "truck",
            Costing::MotorScooter => "motor_scooter",
        }
    }
}

impl fmt::Display for Costing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Costing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Costing::Auto),
            "bicycle" => Ok(Costing::Bicycle),
            "pedestrian" => Ok(Costing::Pedestrian),
            "bus" => Ok(Costing::Bus),
            "truck" => Ok(Costing::Truck),
            "motor_scooter" => Ok(Costing::MotorScooter),
            other => Err(format!("unknown costing '{}'", other)),
        }
    }
}

/// Distance units for maneuver lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Miles,
    Kilometers,
}

impl Units {
    /// Name as used by the routing API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Miles => "miles",
            Units::Kilometers => "kilometers",
        }
    }

    /// Short label for display.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Units::Miles => "mi",
            Units::Kilometers => "km",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "miles" | "mi" => Ok(Units::Miles),
            "kilometers" | "km" => Ok(Units::Kilometers),
            other => Err(format!("unknown units '{}'", other)),
        }
    }
}

/// Routing endpoint configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Full route endpoint URL.
    pub url: String,
    /// API key appended as `api_key`, if the service needs one.
    pub api_key: Option<String>,
    /// Travel mode.
    pub costing: Costing,
    /// Units for maneuver lengths.
    pub units: Units,
    /// Decimal precision of the encoded leg shapes.
    pub shape_precision: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ROUTE_URL.to_string(),
            api_key: None,
            costing: Costing::Auto,
            units: Units::Miles,
            shape_precision: crate::polyline::DEFAULT_PRECISION,
        }
    }
}

impl RoutingConfig {
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

    /// Set the travel mode.
    pub fn with_costing(mut self, costing: Costing) -> Self {
        self.costing = costing;
        self
    }

    /// Set the distance units.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Set the shape precision.
    pub fn with_shape_precision(mut self, precision: u32) -> Self {
        self.shape_precision = precision;
        self
    }
}

/// A computed route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trip {
    /// One leg per consecutive pair of locations.
    #[serde(default)]
    pub legs: Vec<Leg>,
    /// Totals for the whole trip.
    #[serde(default)]
    pub summary: Option<Summary>,
    /// Units used for lengths in this response.
    #[serde(default)]
    pub units: Option<String>,
}

/// Travel between two consecutive locations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Leg {
    /// Encoded polyline of the leg geometry.
    pub shape: String,
    /// Ordered maneuvers.
    #[serde(default)]
    pub maneuvers: Vec<Maneuver>,
    #[serde(default)]
    pub summary: Option<Summary>,
}

/// One instruction in the route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Maneuver {
    /// Human-readable instruction, e.g. "Turn left onto Pine Street."
    pub instruction: String,
    /// Distance covered by this maneuver, in the trip units.
    #[serde(default)]
    pub length: Option<f64>,
    /// Estimated seconds.
    #[serde(default)]
    pub time: Option<f64>,
}

/// Length and duration totals.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Summary {
    pub length: f64,
    pub time: f64,
}

impl Trip {
    /// The first leg, which is the only one for an origin/destination pair.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }
}

/// Computes routes between two coordinates.
pub trait Router: Send + Sync {
    /// Requests a route from `origin` to `destination`.
    ///
    /// # Arguments
    ///
    /// * `origin` - Start of the route, sent as the first location
    /// * `destination` - End of the route
    ///
    /// # Returns
    ///
    /// The trip summary and legs. A successful result always has at least
    /// one leg.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<Trip, RouteError>> + Send;

    /// Decimal precision of the returned leg shapes.
    fn shape_precision(&self) -> u32;

    /// Display name of the service.
    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct RouteRequest {
    locations: [Location; 2],
    costing: Costing,
    directions_options: DirectionsOptions,
}

#[derive(Debug, Serialize)]
struct Location {
    lat: f64,
    lon: f64,
}

impl From<Coordinate> for Location {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat,
            lon: c.lon,
        }
    }
}

#[derive(Debug, Serialize)]
struct DirectionsOptions {
    units: Units,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    trip: Option<Trip>,
    error: Option<String>,
}

/// Valhalla (Mapzen Mobility) router.
pub struct ValhallaRouter<C: AsyncHttpClient> {
    http_client: C,
    config: RoutingConfig,
}

impl<C: AsyncHttpClient> ValhallaRouter<C> {
    /// Creates a router for the given endpoint configuration.
    pub fn new(http_client: C, config: RoutingConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Serializes the request document. Origin is always first.
    fn request_json(&self, origin: Coordinate, destination: Coordinate) -> Result<String, ProviderError> {
        let request = RouteRequest {
            locations: [origin.into(), destination.into()],
            costing: self.config.costing,
            directions_options: DirectionsOptions {
                units: self.config.units,
            },
        };
        serde_json::to_string(&request)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to encode request: {}", e)))
    }

    fn build_url(&self, origin: Coordinate, destination: Coordinate) -> Result<String, ProviderError> {
        let json = self.request_json(origin, destination)?;
        let mut params = vec![("json", json.as_str())];
        if let Some(key) = &self.config.api_key {
            params.push(("api_key", key.as_str()));
        }
        build_url(&self.config.url, &params)
    }
}

impl<C: AsyncHttpClient> Router for ValhallaRouter<C> {
    async fn route(&self, origin: Coordinate, destination: Coordinate) -> Result<Trip, RouteError> {
        let url = self.build_url(origin, destination)?;
        let body = self.http_client.get(&url).await?;
        let response: RouteResponse = serde_json::from_slice(&body).map_err(ProviderError::from)?;

        if let Some(message) = response.error {
            warn!(error = %message, "Routing service reported an error");
            return Err(RouteError::Service(message));
        }

        let trip = response.trip.ok_or(RouteError::NoLegs)?;
        if trip.legs.is_empty() {
            return Err(RouteError::NoLegs);
        }

        debug!(
            legs = trip.legs.len(),
            maneuvers = trip.legs[0].maneuvers.len(),
            "Route response"
        );
        Ok(trip)
    }

    fn shape_precision(&self) -> u32 {
        self.config.shape_precision
    }

    fn name(&self) -> &str {
        "Valhalla"
    }
}
