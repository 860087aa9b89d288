//! Seat booking. Requests are queued and applied on the clock's
//! `BookingRequested` event, so seat mutation is serialized with ticks and a
//! half-applied booking cannot be observed.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Query, Res, ResMut, Resource, World};

use crate::clock::{EventKind, SimulationClock};
use crate::ecs::Vehicle;
use crate::telemetry::{BookingLedger, BookingRecord, BookingStatus};

/// One rider's request for a specific seat.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub vehicle_id: String,
    pub seat_id: String,
    pub price: f64,
}

/// Requests waiting for their `BookingRequested` event.
#[derive(Debug, Default, Resource)]
pub struct PendingBookings(pub VecDeque<BookingRequest>);

/// Queue a booking and schedule it for the current simulation time. The
/// request is applied when the runner processes the event, after any earlier
/// pending event.
pub fn request_booking(world: &mut World, vehicle_id: &str, seat_id: &str, price: f64) {
    world
        .resource_mut::<PendingBookings>()
        .0
        .push_back(BookingRequest {
            vehicle_id: vehicle_id.to_string(),
            seat_id: seat_id.to_string(),
            price,
        });
    let mut clock = world.resource_mut::<SimulationClock>();
    let now = clock.now();
    clock.schedule_at(now, EventKind::BookingRequested);
}

/// Handles `BookingRequested`: drains the pending queue, marking seats and
/// appending ledger records. A request for an unknown vehicle or seat is
/// dropped with a warning; a request for an already-booked seat is rejected
/// without touching the seat or the ledger.
pub fn booking_system(
    clock: Res<SimulationClock>,
    mut pending: ResMut<PendingBookings>,
    mut ledger: ResMut<BookingLedger>,
    mut vehicles: Query<&mut Vehicle>,
) {
    while let Some(request) = pending.0.pop_front() {
        let Some(mut vehicle) = vehicles
            .iter_mut()
            .find(|v| v.id == request.vehicle_id)
        else {
            log::warn!("booking for unknown vehicle {}", request.vehicle_id);
            continue;
        };

        let operator = vehicle.operator;
        let Some(seat) = vehicle.seat_mut(&request.seat_id) else {
            log::warn!(
                "booking for unknown seat {} on {}",
                request.seat_id,
                request.vehicle_id
            );
            continue;
        };

        if seat.booked {
            log::info!(
                "seat {} on {} already booked, rejecting",
                request.seat_id,
                request.vehicle_id
            );
            continue;
        }

        seat.booked = true;
        let record = BookingRecord {
            id: ledger.next_id(clock.now()),
            vehicle_id: request.vehicle_id,
            operator,
            seat_id: request.seat_id,
            price: request.price,
            timestamp: clock.now(),
            status: BookingStatus::Active,
        };
        ledger.bookings.push(record);
    }
}
