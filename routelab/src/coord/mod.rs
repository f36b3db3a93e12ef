//! Coordinate module
//!
//! Provides the geographic coordinate type shared by the polyline codec,
//! the service providers and the map view, plus bounding rectangles used
//! for fit-to-bounds.
//!
//! Two axis orders are in play:
//! - polyline and routing requests use `[lat, lon]`
//! - GeoJSON uses `[lon, lat]`
//!
//! [`Coordinate`] stores named fields so the order only matters at the
//! edges, via [`Coordinate::to_lon_lat`] and [`Coordinate::from_lon_lat`].

mod types;

pub use types::{Bounds, CoordError, Coordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Reverses a `[lat, lon]` sequence into GeoJSON `[lon, lat]` positions.
///
/// The input is left untouched; a new vector is returned.
pub fn to_geojson_positions(points: &[Coordinate]) -> Vec<[f64; 2]> {
    points.iter().map(Coordinate::to_lon_lat).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seattle_is_valid() {
        let coord = Coordinate::new(47.61, -122.33);
        assert!(coord.validate().is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        let result = Coordinate::new(90.5, 0.0).validate();
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_invalid_longitude() {
        let result = Coordinate::new(0.0, -180.01).validate();
        assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
    }

    #[test]
    fn test_nan_is_invalid() {
        let result = Coordinate::new(f64::NAN, 0.0).validate();
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_poles_and_antimeridian_are_valid() {
        assert!(Coordinate::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinate::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_lon_lat_order() {
        let coord = Coordinate::new(38.5, -120.2);
        assert_eq!(coord.to_lon_lat(), [-120.2, 38.5]);
        assert_eq!(coord.to_lat_lon(), [38.5, -120.2]);
        assert_eq!(Coordinate::from_lon_lat([-120.2, 38.5]), coord);
    }

    #[test]
    fn test_parse_lat_lon() {
        let coord: Coordinate = "47.61, -122.33".parse().unwrap();
        assert_eq!(coord, Coordinate::new(47.61, -122.33));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "seattle".parse::<Coordinate>(),
            Err(CoordError::Parse(_))
        ));
        assert!(matches!(
            "47.6,abc".parse::<Coordinate>(),
            Err(CoordError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            "123.0,10.0".parse::<Coordinate>(),
            Err(CoordError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_display_uses_six_decimals() {
        let coord = Coordinate::new(47.61, -122.33);
        assert_eq!(coord.to_string(), "47.610000,-122.330000");
    }

    #[test]
    fn test_bounds_from_corners_normalises() {
        // Corners given north-east first
        let bounds = Bounds::from_corners(
            Coordinate::new(47.67, -122.20),
            Coordinate::new(47.61, -122.33),
        );
        assert_eq!(bounds.south_west, Coordinate::new(47.61, -122.33));
        assert_eq!(bounds.north_east, Coordinate::new(47.67, -122.20));
    }

    #[test]
    fn test_bounds_from_points() {
        let points = [
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds.south_west, Coordinate::new(38.5, -126.453));
        assert_eq!(bounds.north_east, Coordinate::new(43.252, -120.2));
        assert_eq!(bounds.to_bbox(), [-126.453, 38.5, -120.2, 43.252]);
    }

    #[test]
    fn test_bounds_from_no_points() {
        let empty: Vec<Coordinate> = Vec::new();
        assert!(Bounds::from_points(&empty).is_none());
    }

    #[test]
    fn test_bounds_center() {
        let bounds = Bounds::from_corners(Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 20.0));
        assert_eq!(bounds.center(), Coordinate::new(5.0, 10.0));
    }

    #[test]
    fn test_to_geojson_positions_reverses_each_point() {
        let points = vec![Coordinate::new(38.5, -120.2), Coordinate::new(40.7, -120.95)];
        let positions = to_geojson_positions(&points);
        assert_eq!(positions, vec![[-120.2, 38.5], [-120.95, 40.7]]);
        // Input is untouched
        assert_eq!(points[0], Coordinate::new(38.5, -120.2));
    }
}
