//! In-memory map that renders to GeoJSON.

use std::collections::BTreeMap;

use tracing::trace;

use super::{CircleMarker, Feature, FeatureCollection, Layer, LayerId, MapView};
use crate::coord::{Bounds, Coordinate};

/// Initial camera center.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(0.0, 0.0);

/// Initial zoom, showing most of the world.
pub const DEFAULT_ZOOM: u8 = 2;

/// Camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
    /// Last rectangle passed to `fit_bounds`, cleared by `fly_to`.
    pub bounds: Option<Bounds>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            bounds: None,
        }
    }
}

/// A map that keeps its layers in memory.
///
/// Layers are kept in insertion order. [`GeoJsonMap::to_feature_collection`]
/// flattens them into a single document: markers become `Point` features
/// carrying a `marker-color` property, GeoJSON layers contribute their
/// features unchanged.
#[derive(Debug, Default)]
pub struct GeoJsonMap {
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
    viewport: Viewport,
    /// Number of camera moves, for callers that care whether one happened.
    moves: usize,
}

impl GeoJsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// How many times `fly_to` has been called.
    pub fn fly_count(&self) -> usize {
        self.moves
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// All layers in insertion order.
    pub fn layers(&self) -> impl Iterator<Item = (&LayerId, &Layer)> {
        self.layers.iter()
    }

    /// Flattens every layer into one document, with `bbox` set from the
    /// last fitted bounds.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let mut features = Vec::new();
        for layer in self.layers.values() {
            match layer {
                Layer::Marker(marker) => features.push(marker_feature(marker)),
                Layer::GeoJson(collection) => features.extend(collection.features.iter().cloned()),
            }
        }

        FeatureCollection {
            bbox: self.viewport.bounds.map(|b| b.to_bbox()),
            features,
        }
    }
}

fn marker_feature(marker: &CircleMarker) -> Feature {
    let feature = Feature::point(marker.position).with_property("marker-color", marker.color.clone());
    match &marker.title {
        Some(title) => feature.with_property("title", title.clone()),
        None => feature,
    }
}

impl MapView for GeoJsonMap {
    fn fly_to(&mut self, center: Coordinate, zoom: u8) {
        trace!(%center, zoom, "fly_to");
        self.viewport = Viewport {
            center,
            zoom,
            bounds: None,
        };
        self.moves += 1;
    }

    fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);
        id
    }

    fn remove_layer(&mut self, id: LayerId) -> bool {
        self.layers.remove(&id).is_some()
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        trace!(?bounds, "fit_bounds");
        self.viewport.center = bounds.center();
        self.viewport.bounds = Some(bounds);
    }
}
