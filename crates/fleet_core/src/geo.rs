//! Geographic primitives: lat/lng points, haversine distance, planar bearing.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in floating-point degrees. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Haversine distance between two points in metres.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lng1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lng2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlng = (dlng * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Planar bearing from `a` to `b` in degrees: `atan2(Δlng, Δlat)`.
///
/// 0° points towards increasing latitude, 90° towards increasing longitude.
/// This matches the marker rotation convention of the map frontend and is
/// intentionally not a great-circle bearing; paths are short enough that the
/// planar approximation is indistinguishable on screen.
pub fn bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    let dy = b.lat - a.lat;
    let dx = b.lng - a.lng;
    let heading = dx.atan2(dy).to_degrees();
    if heading.is_nan() {
        0.0
    } else {
        heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = GeoPoint::new(-1.2864, 36.8172);
        assert_eq!(haversine_m(p, p), 0.0);
    }

    #[test]
    fn haversine_one_degree_of_latitude_is_about_111km() {
        let a = GeoPoint::new(0.0, 36.8);
        let b = GeoPoint::new(1.0, 36.8);
        let d = haversine_m(a, b);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn bearing_follows_compass_quadrants() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_eq!(bearing_deg(origin, GeoPoint::new(1.0, 0.0)), 0.0);
        assert_eq!(bearing_deg(origin, GeoPoint::new(0.0, 1.0)), 90.0);
        assert_eq!(bearing_deg(origin, GeoPoint::new(-1.0, 0.0)), 180.0);
        assert_eq!(bearing_deg(origin, GeoPoint::new(0.0, -1.0)), -90.0);
    }

    #[test]
    fn is_finite_rejects_nan() {
        assert!(GeoPoint::new(1.0, 2.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 2.0).is_finite());
        assert!(!GeoPoint::new(1.0, f64::INFINITY).is_finite());
    }
}
