//! Encoded polyline codec.
//!
//! Converts between a coordinate sequence and the compact printable-ASCII
//! polyline format used by routing services for route shapes.
//!
//! # Format
//!
//! Each coordinate is stored as the delta from the previous one, scaled by
//! `10^precision` and rounded to an integer. Every delta is then:
//!
//! 1. zig-zag encoded (`v < 0 ? !(v << 1) : v << 1`),
//! 2. split into 5-bit groups, least significant first,
//! 3. OR-ed with `0x20` on every group except the last,
//! 4. offset by 63 to land in the `?`..`~` range.
//!
//! Latitude comes before longitude for every point.
//!
//! Routing services that speak this format usually use precision 6
//! ("polyline6"); the classic published format uses precision 5.
//!
//! # Example
//!
//! ```
//! use routelab::coord::Coordinate;
//! use routelab::polyline;
//!
//! let points = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();
//! assert_eq!(points[0], Coordinate::new(38.5, -120.2));
//!
//! let encoded = polyline::encode(&points, 5).unwrap();
//! assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//! ```

mod error;

pub use error::PolylineError;

use crate::coord::Coordinate;

/// Default number of fractional decimal digits.
pub const DEFAULT_PRECISION: u32 = 6;

/// Largest precision accepted. Beyond this the scale factor no longer keeps
/// degree values exactly representable as integers in an `f64`.
pub const MAX_PRECISION: u32 = 15;

/// Offset added to every 5-bit group to make it printable.
const CHAR_OFFSET: u8 = 63;

/// Last byte of the alphabet (`~`).
const MAX_CHAR: u8 = CHAR_OFFSET + 63;

/// Continuation flag: more groups follow for this value.
const CONTINUATION_BIT: u64 = 0x20;

/// Mask for the 5 payload bits of a group.
const GROUP_MASK: u64 = 0x1f;

/// Largest shift at which a group still fits in a `u64`.
const MAX_SHIFT: u32 = 60;

/// Payload bits left in a `u64` for the group at [`MAX_SHIFT`].
const LAST_GROUP_MASK: u64 = 0xf;

/// Bound on quantised magnitudes so deltas and their zig-zag form never
/// overflow an `i64`.
const MAX_SCALED: f64 = (i64::MAX / 4) as f64;

/// Decodes a polyline into coordinates at the given precision.
///
/// # Arguments
///
/// * `encoded` - The encoded polyline, one printable ASCII byte per group
/// * `precision` - Fractional decimal digits the encoder scaled by (0..=15)
///
/// # Returns
///
/// The decoded points in order. An empty string yields an empty vector.
///
/// # Errors
///
/// Any malformed input is rejected as a whole: a byte outside the alphabet,
/// a value cut short, a latitude without its longitude, or a value or running
/// sum that does not fit in 64 bits.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Coordinate>, PolylineError> {
    let factor = scale_factor(precision)?;
    let bytes = encoded.as_bytes();

    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut coords = Vec::with_capacity(bytes.len() / 4);

    while index < bytes.len() {
        lat = accumulate(lat, bytes, &mut index)?;
        lon = accumulate(lon, bytes, &mut index)?;
        coords.push(Coordinate::new(lat as f64 / factor, lon as f64 / factor));
    }

    Ok(coords)
}

/// Decodes at [`DEFAULT_PRECISION`].
pub fn decode_default(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    decode(encoded, DEFAULT_PRECISION)
}

/// Encodes coordinates into a polyline at the given precision.
///
/// Values are rounded to the nearest `10^-precision` first, so decoding the
/// result yields the quantised input.
///
/// # Arguments
///
/// * `coords` - Points to encode, in order
/// * `precision` - Fractional decimal digits to keep (0..=15)
///
/// # Returns
///
/// The encoded string, empty for an empty slice.
///
/// # Errors
///
/// `InvalidPrecision` above [`MAX_PRECISION`], `NonFiniteCoordinate` for NaN
/// or infinite values and `OutOfRange` when a scaled value is too large to
/// delta-encode.
pub fn encode(coords: &[Coordinate], precision: u32) -> Result<String, PolylineError> {
    let factor = scale_factor(precision)?;

    let mut output = String::with_capacity(coords.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for (i, coord) in coords.iter().enumerate() {
        let lat = quantize(coord.lat, factor, i)?;
        let lon = quantize(coord.lon, factor, i)?;

        write_value(lat - prev_lat, &mut output);
        write_value(lon - prev_lon, &mut output);

        prev_lat = lat;
        prev_lon = lon;
    }

    Ok(output)
}

/// Encodes at [`DEFAULT_PRECISION`].
pub fn encode_default(coords: &[Coordinate]) -> Result<String, PolylineError> {
    encode(coords, DEFAULT_PRECISION)
}

fn scale_factor(precision: u32) -> Result<f64, PolylineError> {
    if precision > MAX_PRECISION {
        return Err(PolylineError::InvalidPrecision(precision));
    }
    Ok(10f64.powi(precision as i32))
}

fn quantize(value: f64, factor: f64, index: usize) -> Result<i64, PolylineError> {
    if !value.is_finite() {
        return Err(PolylineError::NonFiniteCoordinate { index });
    }
    let scaled = (value * factor).round();
    if scaled.abs() > MAX_SCALED {
        return Err(PolylineError::OutOfRange { index });
    }
    Ok(scaled as i64)
}

/// Adds the next delta to a running sum, reporting overflow at the delta's
/// first byte.
fn accumulate(sum: i64, bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let position = *index;
    let delta = next_value(bytes, index)?;
    sum.checked_add(delta)
        .ok_or(PolylineError::Overflow { position })
}

/// Reads one zig-zag varint starting at `*index`, advancing the cursor.
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let position = *index;
        let byte = *bytes
            .get(position)
            .ok_or(PolylineError::UnexpectedEnd { position })?;

        if !(CHAR_OFFSET..=MAX_CHAR).contains(&byte) {
            return Err(PolylineError::InvalidCharacter { position, byte });
        }
        let group = u64::from(byte - CHAR_OFFSET);
        if shift > MAX_SHIFT || (shift == MAX_SHIFT && group & GROUP_MASK > LAST_GROUP_MASK) {
            return Err(PolylineError::Overflow { position });
        }

        result |= (group & GROUP_MASK) << shift;
        shift += 5;
        *index += 1;

        if group & CONTINUATION_BIT == 0 {
            break;
        }
    }

    let value = if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Ok(value as i64)
}

fn write_value(value: i64, output: &mut String) {
    let zigzag = if value < 0 { !(value << 1) } else { value << 1 };
    let mut v = zigzag as u64;

    while v >= CONTINUATION_BIT {
        output.push(char::from(
            ((CONTINUATION_BIT | (v & GROUP_MASK)) as u8) + CHAR_OFFSET,
        ));
        v >>= 5;
    }
    output.push(char::from(v as u8 + CHAR_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLISHED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn published_points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ]
    }

    #[test]
    fn test_decode_published_vector() {
        let points = decode(PUBLISHED, 5).unwrap();
        assert_eq!(points, published_points());
    }

    #[test]
    fn test_encode_published_vector() {
        let encoded = encode(&published_points(), 5).unwrap();
        assert_eq!(encoded, PUBLISHED);
    }

    #[test]
    fn test_published_vector_at_default_precision_is_scaled_down() {
        // Same integers, one more decimal digit
        let points = decode_default(PUBLISHED).unwrap();
        assert_eq!(points[0], Coordinate::new(3.85, -12.02));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_default("").unwrap().is_empty());
        assert_eq!(encode_default(&[]).unwrap(), "");
    }

    #[test]
    fn test_single_origin_point() {
        let encoded = encode_default(&[Coordinate::new(0.0, 0.0)]).unwrap();
        assert_eq!(encoded, "??");
        assert_eq!(decode_default(&encoded).unwrap(), vec![Coordinate::new(0.0, 0.0)]);
    }

    #[test]
    fn test_negative_deltas_roundtrip() {
        let points = vec![Coordinate::new(10.0, 10.0), Coordinate::new(9.0, 9.0)];
        let encoded = encode_default(&points).unwrap();
        assert_eq!(decode_default(&encoded).unwrap(), points);
    }

    #[test]
    fn test_crossing_equator_and_meridian() {
        let points = vec![
            Coordinate::new(0.5, 0.25),
            Coordinate::new(-0.5, -0.25),
            Coordinate::new(-45.123456, -170.654321),
        ];
        let encoded = encode_default(&points).unwrap();
        assert_eq!(decode_default(&encoded).unwrap(), points);
    }

    #[test]
    fn test_encode_quantizes_to_precision() {
        let encoded = encode(&[Coordinate::new(38.5000049, -120.2000049)], 5).unwrap();
        assert_eq!(encoded, "_p~iF~ps|U");
    }

    #[test]
    fn test_trailing_continuation_bit_is_rejected() {
        // '_' = 95 - 63 = 32, continuation bit set with nothing after it
        let result = decode("_p~iF~ps|U_", 5);
        assert_eq!(result, Err(PolylineError::UnexpectedEnd { position: 11 }));
    }

    #[test]
    fn test_latitude_without_longitude_is_rejected() {
        let result = decode("_p~iF", 5);
        assert_eq!(result, Err(PolylineError::UnexpectedEnd { position: 5 }));
    }

    #[test]
    fn test_invalid_character_is_rejected() {
        let result = decode("_p~iF ps|U", 5);
        assert_eq!(
            result,
            Err(PolylineError::InvalidCharacter {
                position: 5,
                byte: b' '
            })
        );
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        let result = decode("é", 5);
        assert!(matches!(result, Err(PolylineError::InvalidCharacter { position: 0, .. })));
    }

    #[test]
    fn test_overlong_value_is_rejected() {
        // The thirteenth group only has four bits left
        let input = "~".repeat(14);
        let result = decode(&input, 5);
        assert_eq!(result, Err(PolylineError::Overflow { position: 12 }));
    }

    #[test]
    fn test_thirteenth_group_must_fit_in_four_bits() {
        // 'O' carries payload 16, one bit past the top of a u64
        let input = format!("{}O?", "~".repeat(12));
        assert_eq!(
            decode(&input, 6),
            Err(PolylineError::Overflow { position: 12 })
        );

        // 'N' carries 15, which still fits
        let input = format!("{}N?", "~".repeat(12));
        assert!(decode(&input, 6).is_ok());
    }

    #[test]
    fn test_running_sum_overflow_is_rejected() {
        let mut pair = String::new();
        write_value(i64::MAX / 2, &mut pair);
        write_value(0, &mut pair);

        // Two halves still fit, the third latitude delta does not
        let input = pair.repeat(3);
        assert_eq!(
            decode(&input, 6),
            Err(PolylineError::Overflow {
                position: pair.len() * 2
            })
        );
    }

    #[test]
    fn test_invalid_precision() {
        assert_eq!(decode("??", 16), Err(PolylineError::InvalidPrecision(16)));
        assert_eq!(
            encode(&[Coordinate::new(0.0, 0.0)], 16),
            Err(PolylineError::InvalidPrecision(16))
        );
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        let result = encode_default(&[
            Coordinate::new(1.0, 1.0),
            Coordinate::new(f64::INFINITY, 0.0),
        ]);
        assert_eq!(result, Err(PolylineError::NonFiniteCoordinate { index: 1 }));
    }

    #[test]
    fn test_encode_rejects_huge_values() {
        let result = encode(&[Coordinate::new(1e12, 0.0)], 15);
        assert_eq!(result, Err(PolylineError::OutOfRange { index: 0 }));
    }

    #[test]
    fn test_encode_does_not_mutate_input() {
        let points = published_points();
        let before = points.clone();
        let _ = encode(&points, 5).unwrap();
        assert_eq!(points, before);
    }

    #[test]
    fn test_output_alphabet() {
        let encoded = encode_default(&[
            Coordinate::new(89.999999, 179.999999),
            Coordinate::new(-89.999999, -179.999999),
        ])
        .unwrap();
        assert!(encoded.bytes().all(|b| (63..=126).contains(&b)));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_six_decimal_values(
                raw in prop::collection::vec(
                    (-90_000_000i64..=90_000_000, -180_000_000i64..=180_000_000),
                    0..64,
                )
            ) {
                // Values already sitting on the 1e-6 grid survive exactly
                let points: Vec<Coordinate> = raw
                    .iter()
                    .map(|&(lat, lon)| Coordinate::new(lat as f64 / 1e6, lon as f64 / 1e6))
                    .collect();

                let encoded = encode_default(&points)?;
                let decoded = decode_default(&encoded)?;
                prop_assert_eq!(decoded, points);
            }

            #[test]
            fn test_roundtrip_error_bounded_by_precision(
                points in prop::collection::vec(
                    (-90.0..90.0_f64, -180.0..180.0_f64),
                    1..32,
                ),
                precision in 1u32..=7,
            ) {
                let coords: Vec<Coordinate> = points.iter().copied().map(Coordinate::from).collect();
                let decoded = decode(&encode(&coords, precision)?, precision)?;

                prop_assert_eq!(decoded.len(), coords.len());
                let tolerance = 0.5 / 10f64.powi(precision as i32) + 1e-9;
                for (a, b) in coords.iter().zip(&decoded) {
                    prop_assert!((a.lat - b.lat).abs() <= tolerance, "lat {} -> {}", a.lat, b.lat);
                    prop_assert!((a.lon - b.lon).abs() <= tolerance, "lon {} -> {}", a.lon, b.lon);
                }
            }

            #[test]
            fn test_decode_never_panics(input in "[ -~]{0,40}") {
                let _ = decode_default(&input);
            }
        }
    }
}
