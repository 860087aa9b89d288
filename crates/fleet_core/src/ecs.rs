//! Fleet state components.
//!
//! Vehicles are spawned once at scenario construction and never despawned
//! during a session. Their mutable fields are touched only by the movement
//! system (progress, segment index, ETA) and the booking system (seat
//! occupancy); render-side code reads them through immutable queries.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Matatu operator (sacco) running a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    SuperMetro,
    Lopha,
    Embassava,
    Nico,
    Kmo,
}

impl Operator {
    pub fn display_name(&self) -> &'static str {
        match self {
            Operator::SuperMetro => "Super Metro",
            Operator::Lopha => "Lopha Travels",
            Operator::Embassava => "Embassava",
            Operator::Nico => "Nico Movers",
            Operator::Kmo => "KMO Shuttles",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Bus,
    MiniBus,
    Van,
}

/// One bookable seat. Seat ids are unique within a vehicle. Once booked, only
/// a future cancellation action may clear the flag (see
/// [crate::telemetry::BookingStatus]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub booked: bool,
}

/// A simulated vehicle looping its assigned route.
///
/// Invariants, maintained by the movement system:
/// - `current_stop_index` is a valid segment index for `route_id`
///   (`0 <= index < segment_count`),
/// - `progress` stays in `[0, 100)` after every tick.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Vehicle {
    pub id: String,
    pub plate_number: String,
    pub operator: Operator,
    pub kind: VehicleKind,
    pub route_id: String,
    /// Index of the segment currently being traversed.
    pub current_stop_index: usize,
    /// Position within the current segment, percentage scale.
    pub progress: f64,
    /// Progress added per tick.
    pub speed: f64,
    pub capacity: usize,
    pub seats: Vec<Seat>,
    /// Advisory minutes-to-arrival shown to riders; perturbed, not derived.
    pub eta_minutes: u32,
}

impl Vehicle {
    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == seat_id)
    }

    pub fn seat_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == seat_id)
    }

    pub fn seats_available(&self) -> usize {
        self.seats.iter().filter(|s| !s.booked).count()
    }
}
