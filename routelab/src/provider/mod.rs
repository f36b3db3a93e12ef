//! External service providers
//!
//! This module provides the traits and HTTP-backed implementations for the
//! three services the route pipeline consumes as black boxes:
//!
//! - [`Geocoder`]: free text to a coordinate ([`PeliasGeocoder`])
//! - [`Router`]: origin/destination to a trip ([`ValhallaRouter`])
//! - [`GeolocationProvider`]: the current position ([`FixedLocation`],
//!   [`IpGeolocation`], [`NoGeolocation`])
//!
//! All network access goes through [`AsyncHttpClient`] so tests can inject
//! canned responses.
//!
//! # Example
//!
//! ```ignore
//! use routelab::provider::{AsyncReqwestClient, PeliasGeocoder, SearchConfig, Geocoder};
//!
//! let client = AsyncReqwestClient::new()?;
//! let geocoder = PeliasGeocoder::new(client, SearchConfig::default().with_api_key("..."));
//! let place = geocoder.search("Pike Place Market").await?;
//! ```

mod geocode;
mod geolocation;
mod http;
mod route;
mod types;

pub use geocode::{GeocodeError, Geocoder, PeliasGeocoder, Place, SearchConfig, DEFAULT_SEARCH_URL};
pub use geolocation::{
    FixedLocation, GeolocationError, GeolocationProvider, IpGeolocation, NoGeolocation, Position,
    DEFAULT_GEOLOCATION_URL,
};
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use route::{
    Costing, Leg, Maneuver, RouteError, Router, RoutingConfig, Summary, Trip, Units,
    ValhallaRouter, DEFAULT_ROUTE_URL,
};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
