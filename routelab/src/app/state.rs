//! Explicit application state owned by the route controller.

use chrono::{DateTime, Utc};

use crate::coord::Coordinate;
use crate::map::LayerId;

/// The user's last known position and the marker showing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionState {
    pub coordinate: Coordinate,
    /// Timestamp of the fix.
    pub updated: DateTime<Utc>,
    pub marker: LayerId,
}

/// Map layers belonging to the currently displayed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLayers {
    pub line: LayerId,
    pub destination: LayerId,
}

/// Everything the controller tracks between user actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Current origin, once geolocation has succeeded.
    pub position: Option<PositionState>,

    /// Set after the first successful fix has centered the map. Later
    /// fixes move the marker but leave the camera alone.
    pub centered: bool,

    /// Layers of the displayed route, removed on the next calculation.
    pub route: Option<RouteLayers>,

    /// Numbered maneuver list for the displayed route.
    pub steps: Vec<String>,
}

impl AppState {
    /// The origin coordinate, if known.
    pub fn origin(&self) -> Option<Coordinate> {
        self.position.map(|p| p.coordinate)
    }
}

/// Formats one entry of the step list. `index` is zero-based.
pub fn format_step(index: usize, instruction: &str) -> String {
    format!("Step {}: {}", index + 1, instruction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_step_is_one_based() {
        assert_eq!(format_step(0, "Head north"), "Step 1: Head north");
        assert_eq!(format_step(9, "Arrive"), "Step 10: Arrive");
    }

    #[test]
    fn test_default_state_is_empty() {
        let state = AppState::default();
        assert!(state.origin().is_none());
        assert!(!state.centered);
        assert!(state.route.is_none());
        assert!(state.steps.is_empty());
    }
}
