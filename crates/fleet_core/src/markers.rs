//! Render-time composition: fleet state + whatever geometry has resolved so
//! far, combined into drawable markers.
//!
//! Pure read side. When a segment's road geometry has not arrived yet the
//! marker falls back to linear interpolation between the raw stops (heading
//! 0); a vehicle whose coordinates come out non-finite is skipped for the
//! frame instead of propagating NaN into the renderer.

use serde::{Deserialize, Serialize};

use crate::ecs::{Operator, Vehicle};
use crate::geometry::RouteGeometryCache;
use crate::routes::RouteTable;
use crate::sampler::sample_position;

/// One drawable vehicle position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleMarker {
    pub vehicle_id: String,
    pub route_id: String,
    pub operator: Operator,
    pub lat: f64,
    pub lng: f64,
    /// Marker rotation; 0 in the straight-line fallback.
    pub heading_deg: f64,
    pub eta_minutes: u32,
    /// Route display color, duplicated here so the renderer needs no joins.
    pub color: String,
}

/// Compose a marker for one vehicle, or `None` when it cannot be drawn this
/// frame (unknown route, or non-finite coordinates).
pub fn marker_for_vehicle(
    routes: &RouteTable,
    cache: &RouteGeometryCache,
    vehicle: &Vehicle,
) -> Option<VehicleMarker> {
    let route = routes.get(&vehicle.route_id)?;

    let (lat, lng, heading_deg) = match cache.segment(&vehicle.route_id, vehicle.current_stop_index)
    {
        Some(segment) => {
            let sample = sample_position(&segment.points, vehicle.progress / 100.0);
            (sample.lat, sample.lng, sample.heading_deg)
        }
        None => {
            // Geometry not resolved yet: straight line between the raw stops.
            let current = route.stops.get(vehicle.current_stop_index)?;
            let next = route
                .stops
                .get(vehicle.current_stop_index + 1)
                .unwrap_or(current);
            let fraction = vehicle.progress / 100.0;
            let lat = current.lat + (next.lat - current.lat) * fraction;
            let lng = current.lng + (next.lng - current.lng) * fraction;
            (lat, lng, 0.0)
        }
    };

    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }

    Some(VehicleMarker {
        vehicle_id: vehicle.id.clone(),
        route_id: vehicle.route_id.clone(),
        operator: vehicle.operator,
        lat,
        lng,
        heading_deg,
        eta_minutes: vehicle.eta_minutes,
        color: route.color.clone(),
    })
}

/// Compose markers for a whole fleet, silently skipping undrawable vehicles.
pub fn capture_fleet_markers<'a>(
    routes: &RouteTable,
    cache: &RouteGeometryCache,
    vehicles: impl Iterator<Item = &'a Vehicle>,
) -> Vec<VehicleMarker> {
    vehicles
        .filter_map(|vehicle| marker_for_vehicle(routes, cache, vehicle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::routing::{PathSource, ResolvedPath};
    use crate::test_helpers::{test_route, test_vehicle};

    fn setup() -> (RouteTable, RouteGeometryCache, Vehicle) {
        let route = test_route();
        let vehicle = test_vehicle("v-test", &route.id);
        (
            RouteTable::new(vec![route]),
            RouteGeometryCache::new(),
            vehicle,
        )
    }

    #[test]
    fn uses_cached_geometry_when_present() {
        let (routes, cache, mut vehicle) = setup();
        let route = routes.get(&vehicle.route_id).expect("route").clone();
        // Detailed geometry for segment 0 with a distinctive midpoint.
        let mut segments: Vec<ResolvedPath> = (0..route.segment_count())
            .map(|i| {
                let (start, end) = route.segment_endpoints(i).expect("endpoints");
                ResolvedPath::straight_line(start, end)
            })
            .collect();
        segments[0] = ResolvedPath {
            points: vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 5.0),
                GeoPoint::new(0.0, 10.0),
            ],
            source: PathSource::Routed,
        };
        cache.publish(&route, segments);

        vehicle.current_stop_index = 0;
        vehicle.progress = 50.0;
        let marker = marker_for_vehicle(&routes, &cache, &vehicle).expect("marker");
        assert!((marker.lat - 0.0).abs() < 1e-6);
        assert!((marker.lng - 5.0).abs() < 1e-6);
        assert!((marker.heading_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn falls_back_to_stop_interpolation_without_geometry() {
        let (routes, cache, mut vehicle) = setup();
        let route = routes.get(&vehicle.route_id).expect("route");
        vehicle.current_stop_index = 0;
        vehicle.progress = 50.0;

        let marker = marker_for_vehicle(&routes, &cache, &vehicle).expect("marker");
        let a = &route.stops[0];
        let b = &route.stops[1];
        assert!((marker.lat - (a.lat + (b.lat - a.lat) * 0.5)).abs() < 1e-9);
        assert!((marker.lng - (a.lng + (b.lng - a.lng) * 0.5)).abs() < 1e-9);
        assert_eq!(marker.heading_deg, 0.0);
    }

    #[test]
    fn unknown_route_yields_no_marker() {
        let (routes, cache, mut vehicle) = setup();
        vehicle.route_id = "route-ghost".to_string();
        assert!(marker_for_vehicle(&routes, &cache, &vehicle).is_none());
    }

    #[test]
    fn non_finite_coordinates_suppress_the_marker() {
        let (routes, cache, mut vehicle) = setup();
        let route = routes.get(&vehicle.route_id).expect("route").clone();
        let mut segments: Vec<ResolvedPath> = (0..route.segment_count())
            .map(|i| {
                let (start, end) = route.segment_endpoints(i).expect("endpoints");
                ResolvedPath::straight_line(start, end)
            })
            .collect();
        segments[0] = ResolvedPath {
            points: vec![GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(0.0, 1.0)],
            source: PathSource::Routed,
        };
        cache.publish(&route, segments);

        vehicle.current_stop_index = 0;
        vehicle.progress = 25.0;
        assert!(marker_for_vehicle(&routes, &cache, &vehicle).is_none());
    }

    #[test]
    fn capture_skips_undrawable_vehicles() {
        let (routes, cache, vehicle) = setup();
        let mut ghost = vehicle.clone();
        ghost.id = "v-ghost".to_string();
        ghost.route_id = "route-ghost".to_string();

        let fleet = [vehicle, ghost];
        let markers = capture_fleet_markers(&routes, &cache, fleet.iter());
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].vehicle_id, "v-test");
    }
}
