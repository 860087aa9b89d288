//! Arc-length position sampling: progress along a multi-point path to an
//! exact point and heading.

use crate::geo::{bearing_deg, haversine_m, GeoPoint};

/// An interpolated position on a path with the travel heading at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledPoint {
    pub lat: f64,
    pub lng: f64,
    /// Planar bearing in degrees of the containing sub-segment; 0 when the
    /// sub-segment is degenerate.
    pub heading_deg: f64,
}

impl SampledPoint {
    /// Sentinel for paths with fewer than two points.
    const DEGENERATE: SampledPoint = SampledPoint {
        lat: 0.0,
        lng: 0.0,
        heading_deg: 0.0,
    };

    fn at(point: GeoPoint, heading_deg: f64) -> Self {
        Self {
            lat: point.lat,
            lng: point.lng,
            heading_deg,
        }
    }
}

/// Samples the point `progress` of the way along `path` by arc length.
///
/// `progress` is clamped to `[0, 1]`; out-of-range input is not an error.
/// A path with fewer than two points yields the `{0, 0, 0}` sentinel, and a
/// path whose points all coincide yields its first point with heading 0 —
/// both documented degeneracies, never panics. Deterministic: same inputs,
/// same output.
pub fn sample_position(path: &[GeoPoint], progress: f64) -> SampledPoint {
    if path.len() < 2 {
        return SampledPoint::DEGENERATE;
    }

    let progress = progress.clamp(0.0, 1.0);

    let mut segment_dists = Vec::with_capacity(path.len() - 1);
    let mut total_dist = 0.0;
    for pair in path.windows(2) {
        let d = haversine_m(pair[0], pair[1]);
        segment_dists.push(d);
        total_dist += d;
    }

    if total_dist == 0.0 {
        return SampledPoint::at(path[0], 0.0);
    }

    let target_dist = total_dist * progress;

    let mut current_dist = 0.0;
    for (i, &dist) in segment_dists.iter().enumerate() {
        let next_dist = current_dist + dist;

        // The last sub-segment also catches targets that float past the
        // running sum through rounding.
        if target_dist <= next_dist || i == segment_dists.len() - 1 {
            if dist == 0.0 {
                return SampledPoint::at(path[i], 0.0);
            }

            let fraction = (target_dist - current_dist) / dist;
            let start = path[i];
            let end = path[i + 1];
            let lat = start.lat + (end.lat - start.lat) * fraction;
            let lng = start.lng + (end.lng - start.lng) * fraction;
            return SampledPoint {
                lat,
                lng,
                heading_deg: bearing_deg(start, end),
            };
        }
        current_dist = next_dist;
    }

    // Unreachable: the final iteration above always returns.
    SampledPoint::at(path[path.len() - 1], 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equator_path() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 5.0),
            GeoPoint::new(0.0, 10.0),
        ]
    }

    #[test]
    fn progress_zero_is_first_point_with_heading_to_second() {
        let path = equator_path();
        let sample = sample_position(&path, 0.0);
        assert_eq!((sample.lat, sample.lng), (0.0, 0.0));
        assert!((sample.heading_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn progress_one_is_last_point() {
        let path = equator_path();
        let sample = sample_position(&path, 1.0);
        assert!((sample.lat - 0.0).abs() < 1e-9);
        assert!((sample.lng - 10.0).abs() < 1e-9);
    }

    #[test]
    fn halfway_along_the_equatorial_segments_is_the_midpoint() {
        // (0,0) -> (0,5) -> (0,10): progress 0.5 lands on (0,5) heading
        // along +longitude.
        let path = equator_path();
        let sample = sample_position(&path, 0.5);
        assert!((sample.lat - 0.0).abs() < 1e-6);
        assert!((sample.lng - 5.0).abs() < 1e-6);
        assert!((sample.heading_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let path = equator_path();
        assert_eq!(sample_position(&path, -0.5), sample_position(&path, 0.0));
        assert_eq!(sample_position(&path, 1.5), sample_position(&path, 1.0));
    }

    #[test]
    fn degenerate_paths_return_the_sentinel() {
        let empty: Vec<GeoPoint> = Vec::new();
        let single = vec![GeoPoint::new(-1.2, 36.8)];
        for progress in [0.0, 0.5, 1.0] {
            assert_eq!(sample_position(&empty, progress), SampledPoint::DEGENERATE);
            assert_eq!(sample_position(&single, progress), SampledPoint::DEGENERATE);
        }
    }

    #[test]
    fn coincident_points_return_first_point_heading_zero() {
        let p = GeoPoint::new(-1.2864, 36.8172);
        let path = vec![p, p, p];
        for progress in [0.0, 0.3, 1.0] {
            let sample = sample_position(&path, progress);
            assert_eq!((sample.lat, sample.lng), (p.lat, p.lng));
            assert_eq!(sample.heading_deg, 0.0);
        }
    }

    #[test]
    fn zero_length_subsegment_inside_a_path_does_not_divide_by_zero() {
        let path = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 10.0),
        ];
        // Progress 0 selects the zero-length first pair.
        let sample = sample_position(&path, 0.0);
        assert_eq!((sample.lat, sample.lng), (0.0, 0.0));
        assert_eq!(sample.heading_deg, 0.0);
        // Past it, sampling proceeds normally.
        let sample = sample_position(&path, 0.5);
        assert!((sample.lng - 5.0).abs() < 1e-6);
    }

    #[test]
    fn traveled_distance_is_monotone_in_progress() {
        // Deliberately non-uniform segment lengths.
        let path = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 4.0),
            GeoPoint::new(0.0, 4.5),
            GeoPoint::new(0.0, 10.0),
        ];
        let start = path[0];
        let mut last = -1.0;
        for step in 0..=100 {
            let progress = step as f64 / 100.0;
            let sample = sample_position(&path, progress);
            // Along a single parallel, distance from the start is a faithful
            // proxy for arc length.
            let traveled = haversine_m(start, GeoPoint::new(sample.lat, sample.lng));
            assert!(
                traveled >= last - 1e-6,
                "traveled distance decreased at progress {progress}"
            );
            last = traveled;
        }
    }
}
