//! Application controller.
//!
//! [`RouteController`] owns the geocoder, router and map, plus the explicit
//! [`AppState`] that tracks the user's position and the displayed route.
//!
//! # Flow
//!
//! ```text
//! locate() ──► update_position() ──► origin marker (+ center, first time only)
//!
//! calculate(text)
//!   ├─ empty text?          ──► AppError::EmptyDestination
//!   ├─ no origin?           ──► AppError::NoOrigin
//!   ├─ clear previous route
//!   ├─ Geocoder::search     ──► AppError::GeocodeEmptyResult / GeocodeFailed
//!   ├─ Router::route        ──► AppError::RouteRequestFailed
//!   ├─ polyline::decode     ──► AppError::MalformedPolyline
//!   └─ draw line + destination marker, fit bounds, list steps
//! ```
//!
//! # Example
//!
//! ```ignore
//! use routelab::app::RouteController;
//! use routelab::map::GeoJsonMap;
//!
//! let mut controller = RouteController::new(geocoder, router, GeoJsonMap::new());
//! controller.locate(&FixedLocation::new(origin), DEFAULT_GEOLOCATION_TIMEOUT).await?;
//! let outcome = controller.calculate("Pike Place Market").await?;
//! for step in &outcome.steps {
//!     println!("{step}");
//! }
//! ```

mod controller;
mod error;
mod state;

pub use controller::{RouteController, RouteOutcome, DEFAULT_GEOLOCATION_TIMEOUT, ORIGIN_ZOOM};
pub use error::AppError;
pub use state::{format_step, AppState, PositionState, RouteLayers};
