//! Scenario construction: turns a parameter set into a ready-to-run world.

use bevy_ecs::prelude::{Resource, World};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;

use crate::catalog::{initial_fleet, nairobi_routes};
use crate::clock::{SimulationClock, TICK_INTERVAL_MS};
use crate::eta::{EtaModel, DEFAULT_DECREMENT_PROBABILITY};
use crate::geometry::RouteGeometryCache;
use crate::routes::RouteTable;
use crate::routing::{build_path_provider, PathProviderKind, PathProviderResource};
use crate::systems::booking::PendingBookings;
use crate::telemetry::{BookingLedger, FleetSnapshotConfig, FleetSnapshots};

/// Milliseconds the movement system waits between ticks.
#[derive(Debug, Clone, Copy, Resource)]
pub struct TickInterval(pub u64);

/// Optional hard stop: events past this timestamp are not processed.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTimeMs(pub u64);

/// Everything that varies between simulation runs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScenarioParams {
    /// Seed for seat occupancy and ETA jitter. `None` draws from entropy.
    pub seed: Option<u64>,
    pub tick_interval_ms: u64,
    pub eta_decrement_probability: f64,
    pub simulation_end_time_ms: Option<u64>,
    pub path_provider: PathProviderKind,
    pub snapshot_interval_ms: u64,
    pub max_snapshots: usize,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        let snapshot_defaults = FleetSnapshotConfig::default();
        Self {
            seed: None,
            tick_interval_ms: TICK_INTERVAL_MS,
            eta_decrement_probability: DEFAULT_DECREMENT_PROBABILITY,
            simulation_end_time_ms: None,
            path_provider: PathProviderKind::default(),
            snapshot_interval_ms: snapshot_defaults.interval_ms,
            max_snapshots: snapshot_defaults.max_snapshots,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    pub fn with_eta_decrement_probability(mut self, probability: f64) -> Self {
        self.eta_decrement_probability = probability;
        self
    }

    pub fn with_simulation_end_time_ms(mut self, end_time_ms: u64) -> Self {
        self.simulation_end_time_ms = Some(end_time_ms);
        self
    }

    pub fn with_path_provider(mut self, kind: PathProviderKind) -> Self {
        self.path_provider = kind;
        self
    }

    pub fn with_snapshot_interval_ms(mut self, interval_ms: u64) -> Self {
        self.snapshot_interval_ms = interval_ms;
        self
    }
}

/// Build a world holding the Nairobi routes and starting fleet, with every
/// resource the schedule expects. Geometry is NOT resolved here; call
/// [`begin_geometry_population`] (or the cache's blocking variant) once the
/// world exists.
pub fn build_scenario(params: &ScenarioParams) -> World {
    let mut world = World::new();

    let routes = nairobi_routes();
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for vehicle in initial_fleet(&mut rng) {
        world.spawn(vehicle);
    }

    world.insert_resource(RouteTable::new(routes));
    world.insert_resource(RouteGeometryCache::new());
    world.insert_resource(PathProviderResource(build_path_provider(
        &params.path_provider,
    )));
    world.insert_resource(SimulationClock::default());
    world.insert_resource(TickInterval(params.tick_interval_ms));
    world.insert_resource(EtaModel::with_probability(
        params.seed,
        params.eta_decrement_probability,
    ));
    world.insert_resource(BookingLedger::default());
    world.insert_resource(PendingBookings::default());
    world.insert_resource(FleetSnapshotConfig {
        interval_ms: params.snapshot_interval_ms,
        max_snapshots: params.max_snapshots,
    });
    world.insert_resource(FleetSnapshots::default());
    if let Some(end_time_ms) = params.simulation_end_time_ms {
        world.insert_resource(SimulationEndTimeMs(end_time_ms));
    }

    world
}

/// Kick off background geometry resolution for every route in the world,
/// using the world's configured path provider. Returns the per-route thread
/// handles; joining them is optional.
pub fn begin_geometry_population(world: &World) -> Vec<JoinHandle<()>> {
    let routes: Vec<_> = world
        .resource::<RouteTable>()
        .iter()
        .cloned()
        .collect();
    let provider = world.resource::<PathProviderResource>().0.clone();
    world
        .resource::<RouteGeometryCache>()
        .spawn_population(routes, provider)
}
