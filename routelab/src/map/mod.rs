//! Map view abstraction.
//!
//! The route controller talks to a map through the [`MapView`] trait, which
//! mirrors what an interactive map widget offers: move the camera, add and
//! remove layers, fit the view to a rectangle. [`GeoJsonMap`] is the
//! in-memory implementation; it can export everything it shows as one
//! GeoJSON document.
//!
//! ```text
//! RouteController ──► MapView ──► GeoJsonMap ──► FeatureCollection (JSON)
//! ```

mod geojson;
mod view;

pub use geojson::{route_feature_collection, Feature, FeatureCollection, Geometry};
pub use view::{GeoJsonMap, Viewport, DEFAULT_CENTER, DEFAULT_ZOOM};

use crate::coord::{Bounds, Coordinate};

/// Marker color for the user's position.
pub const ORIGIN_COLOR: &str = "blue";

/// Marker color for the geocoded destination.
pub const DESTINATION_COLOR: &str = "red";

/// Handle for a layer added to a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

/// A small circle drawn at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub position: Coordinate,
    pub color: String,
    /// Optional hover text.
    pub title: Option<String>,
}

impl CircleMarker {
    pub fn new(position: Coordinate, color: impl Into<String>) -> Self {
        Self {
            position,
            color: color.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Something a map can display.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(CircleMarker),
    /// An arbitrary GeoJSON document, such as a route line.
    GeoJson(FeatureCollection),
}

/// The operations the controller needs from a map widget.
pub trait MapView {
    /// Moves the camera to `center` at `zoom`.
    fn fly_to(&mut self, center: Coordinate, zoom: u8);

    /// Adds a layer and returns its handle.
    fn add_layer(&mut self, layer: Layer) -> LayerId;

    /// Removes a layer. Returns false if the handle is unknown.
    fn remove_layer(&mut self, id: LayerId) -> bool;

    /// Adjusts the view so `bounds` is fully visible.
    fn fit_bounds(&mut self, bounds: Bounds);
}
