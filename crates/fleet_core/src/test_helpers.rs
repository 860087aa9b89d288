//! Shared fixtures for in-crate tests and downstream integration tests.
//! Compiled under the default-on `test-helpers` feature.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::World;

use crate::catalog::generate_seats;
use crate::clock::SimulationClock;
use crate::ecs::{Operator, Vehicle, VehicleKind};
use crate::eta::EtaModel;
use crate::geo::GeoPoint;
use crate::geometry::RouteGeometryCache;
use crate::routes::{Route, RouteTable, Stop};
use crate::routing::{PathProvider, PathSource, ResolvedPath};
use crate::scenario::TickInterval;
use crate::systems::booking::PendingBookings;
use crate::telemetry::{BookingLedger, FleetSnapshotConfig, FleetSnapshots};

/// A three-segment route near the Nairobi CBD.
pub fn test_route() -> Route {
    Route {
        id: "route-test".to_string(),
        name: "Test Corridor".to_string(),
        color: "#123456".to_string(),
        stops: vec![
            Stop {
                lat: -1.28,
                lng: 36.80,
                label: "Stop A".to_string(),
            },
            Stop {
                lat: -1.29,
                lng: 36.82,
                label: "Stop B".to_string(),
            },
            Stop {
                lat: -1.30,
                lng: 36.84,
                label: "Stop C".to_string(),
            },
            Stop {
                lat: -1.31,
                lng: 36.86,
                label: "Stop D".to_string(),
            },
        ],
    }
}

/// A vehicle at the start of the given route, every seat free.
pub fn test_vehicle(id: &str, route_id: &str) -> Vehicle {
    let capacity = 14;
    let mut seats = generate_seats(capacity, &mut rand::thread_rng());
    for seat in &mut seats {
        seat.booked = false;
    }
    Vehicle {
        id: id.to_string(),
        plate_number: "KTEST 001".to_string(),
        operator: Operator::SuperMetro,
        kind: VehicleKind::MiniBus,
        route_id: route_id.to_string(),
        current_stop_index: 0,
        progress: 0.0,
        speed: 0.5,
        capacity,
        seats,
        eta_minutes: 10,
    }
}

/// A world with the test route, one vehicle (`v-test`), and every resource
/// the simulation schedule expects. Geometry starts unpopulated.
pub fn create_test_world() -> World {
    let mut world = World::new();
    let route = test_route();
    world.spawn(test_vehicle("v-test", &route.id));
    world.insert_resource(RouteTable::new(vec![route]));
    world.insert_resource(RouteGeometryCache::new());
    world.insert_resource(SimulationClock::default());
    world.insert_resource(TickInterval(crate::clock::TICK_INTERVAL_MS));
    world.insert_resource(EtaModel::with_probability(Some(1), 0.0));
    world.insert_resource(BookingLedger::default());
    world.insert_resource(PendingBookings::default());
    world.insert_resource(FleetSnapshotConfig::default());
    world.insert_resource(FleetSnapshots::default());
    world
}

/// A deterministic [`PathProvider`] for tests: counts calls, optionally
/// sleeps per call, optionally inserts the segment midpoint so the result is
/// distinguishable from the straight-line fallback.
#[derive(Default)]
pub struct ScriptedPathProvider {
    midpoint: bool,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedPathProvider {
    /// Provider whose paths carry an interior midpoint, tagged `Routed`.
    pub fn with_midpoint() -> Self {
        Self {
            midpoint: true,
            ..Self::default()
        }
    }

    /// Provider that sleeps `delay` on every fetch.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Handle to the number of `fetch_path` calls made so far.
    pub fn call_count_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl PathProvider for ScriptedPathProvider {
    fn fetch_path(&self, start: GeoPoint, end: GeoPoint) -> ResolvedPath {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let mut points = vec![start];
        if self.midpoint {
            points.push(GeoPoint::new(
                (start.lat + end.lat) / 2.0,
                (start.lng + end.lng) / 2.0,
            ));
        }
        points.push(end);
        ResolvedPath {
            points,
            source: PathSource::Routed,
        }
    }
}
