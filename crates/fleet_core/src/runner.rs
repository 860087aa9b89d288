//! Event-driven runner: pops one event at a time off the clock, publishes it
//! as [`CurrentEvent`], and runs the schedule. Systems are gated on the
//! current event kind, so a schedule pass executes exactly the handlers for
//! the popped event.

use bevy_ecs::prelude::{IntoSystemConfigs, Res, Schedule, World};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::scenario::SimulationEndTimeMs;
use crate::systems::booking::booking_system;
use crate::systems::movement::movement_system;
use crate::systems::snapshot::snapshot_system;
use crate::systems::startup::simulation_started_system;

pub fn is_simulation_started(event: Res<CurrentEvent>) -> bool {
    event.0.kind == EventKind::SimulationStarted
}

pub fn is_tick(event: Res<CurrentEvent>) -> bool {
    event.0.kind == EventKind::Tick
}

pub fn is_booking_requested(event: Res<CurrentEvent>) -> bool {
    event.0.kind == EventKind::BookingRequested
}

/// The full simulation schedule. Handlers run in a fixed order; each is
/// gated on its event kind.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            simulation_started_system.run_if(is_simulation_started),
            movement_system.run_if(is_tick),
            booking_system.run_if(is_booking_requested),
            snapshot_system.run_if(is_tick),
        )
            .chain(),
    );
    schedule
}

/// Schedule the `SimulationStarted` event at t=0. Call once after
/// [`crate::scenario::build_scenario`].
pub fn initialize_simulation(world: &mut World) {
    world
        .resource_mut::<SimulationClock>()
        .schedule_at(0, EventKind::SimulationStarted);
}

/// Pop and process the next event. Returns `false` when the clock is empty
/// or the configured end time has been reached; reaching the end time clears
/// all pending events, leaving the world in its last fully-mutated state.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let end_time = world.get_resource::<SimulationEndTimeMs>().map(|e| e.0);

    let mut clock = world.resource_mut::<SimulationClock>();
    if let (Some(end), Some(next)) = (end_time, clock.next_event_time()) {
        if next > end {
            clock.clear();
            return false;
        }
    }
    let Some(event) = clock.pop_next() else {
        return false;
    };

    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    true
}

/// Drive the simulation until the clock runs dry or the end time is hit.
/// Without an end time the tick loop reschedules itself forever, so callers
/// not using [`SimulationEndTimeMs`] should step with [`run_next_event`].
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule) {
    while run_next_event(world, schedule) {}
}
