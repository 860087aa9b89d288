//! Periodic fleet snapshots, captured on the tick that crosses the
//! configured interval.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::SimulationClock;
use crate::ecs::Vehicle;
use crate::geometry::RouteGeometryCache;
use crate::markers::capture_fleet_markers;
use crate::routes::RouteTable;
use crate::telemetry::{FleetSnapshot, FleetSnapshotConfig, FleetSnapshots};

pub fn snapshot_system(
    clock: Res<SimulationClock>,
    config: Res<FleetSnapshotConfig>,
    mut snapshots: ResMut<FleetSnapshots>,
    routes: Res<RouteTable>,
    cache: Res<RouteGeometryCache>,
    vehicles: Query<&Vehicle>,
) {
    let due = match snapshots.last_snapshot_at {
        None => true,
        Some(last) => clock.now().saturating_sub(last) >= config.interval_ms,
    };
    if !due {
        return;
    }

    let markers = capture_fleet_markers(&routes, &cache, vehicles.iter());
    snapshots.push(
        FleetSnapshot {
            timestamp_ms: clock.now(),
            markers,
        },
        config.max_snapshots,
    );
}
