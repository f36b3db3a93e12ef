//! RouteLab - geocode, route and draw
//!
//! This library resolves a free-text destination, requests a route from the
//! user's position to it, decodes the route's encoded polyline shape and
//! renders the result as GeoJSON with a numbered list of maneuvers.
//!
//! # Modules
//!
//! - [`polyline`]: encoded polyline codec with configurable precision
//! - [`coord`]: coordinates, bounds and axis-order helpers
//! - [`provider`]: geocoding, routing and geolocation services
//! - [`map`]: map abstraction and an in-memory GeoJSON map
//! - [`app`]: the route controller and its state
//! - [`config`]: the INI configuration file
//! - [`logging`]: tracing subscriber setup

pub mod app;
pub mod config;
pub mod coord;
pub mod logging;
pub mod map;
pub mod polyline;
pub mod provider;

/// Crate version, used in the HTTP user agent and CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
