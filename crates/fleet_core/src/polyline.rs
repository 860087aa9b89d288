//! Decoder for the OSRM/Google encoded-polyline format.
//!
//! Values arrive as a byte stream biased by 63, five payload bits per byte
//! with bit 0x20 as the continuation flag, zigzag-signed via bitwise
//! complement on odd results, and accumulated as running lat/lng deltas
//! scaled by `10^precision`.

use crate::geo::GeoPoint;

/// Default precision used by OSRM's `geometries=polyline`.
pub const DEFAULT_PRECISION: u32 = 5;

/// Decodes an encoded polyline into an ordered coordinate sequence.
///
/// Malformed input is not validated: a truncated or garbled string simply
/// yields a truncated coordinate list. That is an accepted limitation of the
/// wire format — the upstream router is the only producer we talk to.
pub fn decode(encoded: &str, precision: u32) -> Vec<GeoPoint> {
    let factor = 10f64.powi(precision as i32);
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut coordinates = Vec::new();

    while index < bytes.len() {
        let Some((lat_delta, next)) = decode_value(bytes, index) else {
            break;
        };
        let Some((lng_delta, next)) = decode_value(bytes, next) else {
            break;
        };
        index = next;

        lat += lat_delta;
        lng += lng_delta;
        coordinates.push(GeoPoint::new(lat as f64 / factor, lng as f64 / factor));
    }

    coordinates
}

/// Decodes one varint-style value starting at `index`. Returns the signed
/// delta and the index of the first byte after it, or `None` if the stream
/// ends mid-value or the value runs past an i64's width (garbled input; a
/// real coordinate delta fits in a handful of 5-bit groups).
fn decode_value(bytes: &[u8], mut index: usize) -> Option<(i64, usize)> {
    let mut shift = 0;
    let mut result: i64 = 0;
    loop {
        if shift >= 64 {
            return None;
        }
        let byte = (*bytes.get(index)? as i64) - 63;
        index += 1;
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }
    let delta = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Some((delta, index))
}
