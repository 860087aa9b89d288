//! Booking ledger and periodic fleet snapshots.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::ecs::Operator;
use crate::markers::VehicleMarker;

/// Lifecycle of a booking. `Active` is the only state this engine writes;
/// `Cancelled` and `Completed` are the hooks for the future cancellation and
/// trip-completion flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Active,
    Cancelled,
    Completed,
}

/// One confirmed seat booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: String,
    pub vehicle_id: String,
    pub operator: Operator,
    pub seat_id: String,
    pub price: f64,
    /// Simulation time (ms) when the booking was applied.
    pub timestamp: u64,
    pub status: BookingStatus,
}

/// Append-only ledger of bookings. Insert as a resource; the booking system
/// appends one record per successful booking.
#[derive(Debug, Default, Resource)]
pub struct BookingLedger {
    pub bookings: Vec<BookingRecord>,
}

impl BookingLedger {
    /// Next ledger id, derived from the current length.
    pub fn next_id(&self, timestamp: u64) -> String {
        format!("bk-{}-{}", timestamp, self.bookings.len())
    }
}

/// Snapshot of the drawable fleet at a specific timestamp (simulation ms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub timestamp_ms: u64,
    pub markers: Vec<VehicleMarker>,
}

/// Snapshot capture configuration.
#[derive(Debug, Clone, Copy, Resource)]
pub struct FleetSnapshotConfig {
    pub interval_ms: u64,
    pub max_snapshots: usize,
}

impl Default for FleetSnapshotConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            max_snapshots: 10_000,
        }
    }
}

/// Rolling snapshot buffer.
#[derive(Debug, Default, Resource)]
pub struct FleetSnapshots {
    pub snapshots: VecDeque<FleetSnapshot>,
    pub last_snapshot_at: Option<u64>,
}

impl FleetSnapshots {
    pub fn push(&mut self, snapshot: FleetSnapshot, max_snapshots: usize) {
        self.last_snapshot_at = Some(snapshot.timestamp_ms);
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > max_snapshots {
            self.snapshots.pop_front();
        }
    }
}
