//! Simulation clock: a min-heap of timestamped events.
//!
//! The tick loop is expressed as events: `Tick` fires at a fixed period and
//! the movement system reschedules the next one, so no tick can begin before
//! the previous tick's mutation completed (the runner pops one event at a
//! time). [`SimulationClock::clear`] is the clean-stop handle: it drops all
//! pending events and leaves the world in its last fully-mutated state.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

/// Fixed tick period of the fleet simulation.
pub const TICK_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    SimulationStarted,
    Tick,
    BookingRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by timestamp.
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event most recently popped by the runner, visible to systems.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    /// Current simulation time in ms.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        self.events.push(Event { timestamp, kind });
    }

    pub fn schedule_in(&mut self, delta_ms: u64, kind: EventKind) {
        self.schedule_at(self.now + delta_ms, kind);
    }

    /// Pops the earliest event and advances `now` to its timestamp.
    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    /// Timestamp of the next pending event without popping it.
    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|e| e.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clean stop: discard every pending event. `now` is left at the last
    /// processed timestamp.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
