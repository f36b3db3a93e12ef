//! Minimal GeoJSON document types.
//!
//! Only the shapes the route view produces are modelled: `Point` and
//! `LineString` geometries inside `Feature`s inside a `FeatureCollection`.
//! Positions are `[lon, lat]`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::coord::{to_geojson_positions, Coordinate};

/// A GeoJSON geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
}

/// A GeoJSON feature with free-form properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: Map<String, Value>,
    pub geometry: Geometry,
}

impl Feature {
    /// A feature with empty properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            properties: Map::new(),
            geometry,
        }
    }

    /// Adds or replaces a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// A point feature at `position`.
    pub fn point(position: Coordinate) -> Self {
        Self::new(Geometry::Point {
            coordinates: position.to_lon_lat(),
        })
    }

    /// A line feature through `points`, reversed into GeoJSON order.
    pub fn line_string(points: &[Coordinate]) -> Self {
        Self::new(Geometry::LineString {
            coordinates: to_geojson_positions(points),
        })
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            bbox: None,
            features,
        }
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the route layer document: one `LineString` feature through the
/// decoded `[lat, lon]` points, reversed per point to `[lon, lat]`.
pub fn route_feature_collection(points: &[Coordinate]) -> FeatureCollection {
    FeatureCollection::new(vec![Feature::line_string(points)])
}
