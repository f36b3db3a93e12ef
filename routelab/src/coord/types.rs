//! Core coordinate types.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors that can occur when validating or parsing coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside [-90, 90] or not a finite number.
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not a finite number.
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),

    /// Text could not be parsed as `lat,lon`.
    #[error("Cannot parse '{0}' as a coordinate (expected LAT,LON)")]
    Parse(String),
}

/// A geographic position as a (latitude, longitude) pair in degrees.
///
/// The field order matches the polyline encoding, which stores latitude
/// first. GeoJSON uses the opposite order, see [`Coordinate::to_lon_lat`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Coordinate {
    /// Creates a new coordinate. No range checking is performed.
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a coordinate from a GeoJSON-ordered `[lon, lat]` position.
    #[inline]
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        Self {
            lat: position[1],
            lon: position[0],
        }
    }

    /// Returns the position in GeoJSON order, `[lon, lat]`.
    #[inline]
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Returns the position in polyline order, `[lat, lon]`.
    #[inline]
    pub fn to_lat_lon(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    /// Checks that latitude and longitude are finite and within range.
    pub fn validate(&self) -> Result<(), CoordError> {
        if !self.lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&self.lat) {
            return Err(CoordError::InvalidLatitude(self.lat));
        }
        if !self.lon.is_finite() || !(MIN_LON..=MAX_LON).contains(&self.lon) {
            return Err(CoordError::InvalidLongitude(self.lon));
        }
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = CoordError;

    /// Parses `"lat,lon"`. Surrounding whitespace around either number is
    /// ignored. The parsed value is range checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordError::Parse(s.to_string()))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoordError::Parse(s.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| CoordError::Parse(s.to_string()))?;

        let coord = Coordinate::new(lat, lon);
        coord.validate()?;
        Ok(coord)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// An axis-aligned geographic rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum latitude and longitude.
    pub south_west: Coordinate,
    /// Maximum latitude and longitude.
    pub north_east: Coordinate,
}

impl Bounds {
    /// Creates bounds from two opposite corners given in any order.
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        Self {
            south_west: Coordinate::new(a.lat.min(b.lat), a.lon.min(b.lon)),
            north_east: Coordinate::new(a.lat.max(b.lat), a.lon.max(b.lon)),
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty set.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::from_corners(first, first), |bounds, p| {
            bounds.extend(*p)
        }))
    }

    /// Returns bounds grown to include `point`.
    pub fn extend(self, point: Coordinate) -> Self {
        Self {
            south_west: Coordinate::new(
                self.south_west.lat.min(point.lat),
                self.south_west.lon.min(point.lon),
            ),
            north_east: Coordinate::new(
                self.north_east.lat.max(point.lat),
                self.north_east.lon.max(point.lon),
            ),
        }
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }

    /// GeoJSON bounding box, `[west, south, east, north]`.
    pub fn to_bbox(&self) -> [f64; 4] {
        [
            self.south_west.lon,
            self.south_west.lat,
            self.north_east.lon,
            self.north_east.lat,
        ]
    }
}
