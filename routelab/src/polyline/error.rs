//! Error types for polyline encoding and decoding.

use std::fmt;

/// Errors that can occur while decoding or encoding a polyline.
///
/// Decoding never yields a partial sequence: any of these aborts the whole
/// call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
    /// Input ended while a value was still open. Either the final character
    /// has its continuation bit set, or a latitude has no longitude.
    UnexpectedEnd { position: usize },

    /// A byte outside the encoding alphabet (`?` through `~`).
    InvalidCharacter { position: usize, byte: u8 },

    /// A single value needs more than 64 bits.
    Overflow { position: usize },

    /// Precision too large to scale without losing integer exactness.
    InvalidPrecision(u32),

    /// Coordinate at `index` is NaN or infinite.
    NonFiniteCoordinate { index: usize },

    /// Coordinate at `index` is too large to quantise at this precision.
    OutOfRange { index: usize },
}

impl fmt::Display for PolylineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolylineError::UnexpectedEnd { position } => {
                write!(f, "Malformed polyline: unexpected end of input at byte {}", position)
            }
            PolylineError::InvalidCharacter { position, byte } => write!(
                f,
                "Malformed polyline: invalid character 0x{:02x} at byte {}",
                byte, position
            ),
            PolylineError::Overflow { position } => {
                write!(f, "Malformed polyline: value overflows at byte {}", position)
            }
            PolylineError::InvalidPrecision(p) => {
                write!(f, "Invalid precision {} (maximum is {})", p, super::MAX_PRECISION)
            }
            PolylineError::NonFiniteCoordinate { index } => {
                write!(f, "Coordinate {} is not a finite number", index)
            }
            PolylineError::OutOfRange { index } => {
                write!(f, "Coordinate {} is too large to encode", index)
            }
        }
    }
}

impl std::error::Error for PolylineError {}
