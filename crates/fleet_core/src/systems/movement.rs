//! The per-tick fleet mutation: advance every vehicle along its segment,
//! roll over segment boundaries, wrap at the end of the route, and drift the
//! advisory ETA. The system reschedules the next `Tick` itself, so exactly
//! one tick is ever pending.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{EventKind, SimulationClock};
use crate::ecs::Vehicle;
use crate::eta::EtaModel;
use crate::routes::RouteTable;
use crate::scenario::TickInterval;

pub fn movement_system(
    mut clock: ResMut<SimulationClock>,
    tick: Res<TickInterval>,
    routes: Res<RouteTable>,
    mut eta: ResMut<EtaModel>,
    mut vehicles: Query<&mut Vehicle>,
) {
    for mut vehicle in vehicles.iter_mut() {
        let Some(route) = routes.get(&vehicle.route_id) else {
            // A vehicle on an unknown route stays put; the tick must not die.
            log::warn!(
                "vehicle {} references unknown route {}",
                vehicle.id,
                vehicle.route_id
            );
            continue;
        };

        vehicle.progress += vehicle.speed;
        if vehicle.progress >= 100.0 {
            vehicle.progress = 0.0;
            vehicle.current_stop_index += 1;
            if vehicle.current_stop_index >= route.segment_count() {
                vehicle.current_stop_index = 0;
            }
        }

        if eta.should_decrement() {
            vehicle.eta_minutes = vehicle.eta_minutes.saturating_sub(1);
        }
    }

    clock.schedule_in(tick.0, EventKind::Tick);
}
