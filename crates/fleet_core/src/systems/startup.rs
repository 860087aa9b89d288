use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{EventKind, SimulationClock};
use crate::scenario::TickInterval;

/// Handles `SimulationStarted`: arms the tick loop by scheduling the first
/// `Tick` one interval out.
pub fn simulation_started_system(mut clock: ResMut<SimulationClock>, tick: Res<TickInterval>) {
    clock.schedule_in(tick.0, EventKind::Tick);
    log::info!("simulation started, first tick in {}ms", tick.0);
}
