//! Event handlers, one module per concern. Wiring into a schedule lives in
//! [`crate::runner`].

pub mod booking;
pub mod movement;
pub mod snapshot;
pub mod startup;

#[cfg(test)]
mod tests {
    use crate::clock::SimulationClock;
    use crate::ecs::Vehicle;
    use crate::eta::EtaModel;
    use crate::runner::{initialize_simulation, run_next_event, simulation_schedule};
    use crate::systems::booking::request_booking;
    use crate::telemetry::{BookingLedger, BookingStatus, FleetSnapshots};
    use crate::test_helpers::create_test_world;
    use bevy_ecs::prelude::World;

    fn vehicle(world: &mut World) -> Vehicle {
        world.query::<&Vehicle>().single(world).clone()
    }

    fn step(world: &mut World, schedule: &mut bevy_ecs::schedule::Schedule, count: usize) {
        for _ in 0..count {
            assert!(run_next_event(world, schedule), "clock ran dry");
        }
    }

    #[test]
    fn progress_accumulates_by_speed_each_tick() {
        let mut world = create_test_world();
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        // Start event plus three ticks.
        step(&mut world, &mut schedule, 4);
        let v = vehicle(&mut world);
        assert!((v.progress - 3.0 * v.speed).abs() < 1e-9);
        assert_eq!(v.current_stop_index, 0);
    }

    #[test]
    fn crossing_a_segment_boundary_resets_progress() {
        let mut world = create_test_world();
        {
            let mut v = world.query::<&mut Vehicle>().single_mut(&mut world);
            v.progress = 99.9;
        }
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        step(&mut world, &mut schedule, 2);
        let v = vehicle(&mut world);
        assert_eq!(v.progress, 0.0);
        assert_eq!(v.current_stop_index, 1);
    }

    #[test]
    fn finishing_the_last_segment_wraps_to_the_route_start() {
        let mut world = create_test_world();
        {
            let mut v = world.query::<&mut Vehicle>().single_mut(&mut world);
            // test_route has 3 segments; put the vehicle at the end of the last.
            v.current_stop_index = 2;
            v.progress = 99.9;
        }
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        step(&mut world, &mut schedule, 2);
        let v = vehicle(&mut world);
        assert_eq!(v.current_stop_index, 0);
        assert_eq!(v.progress, 0.0);
    }

    #[test]
    fn unknown_route_leaves_the_vehicle_untouched_and_keeps_ticking() {
        let mut world = create_test_world();
        {
            let mut v = world.query::<&mut Vehicle>().single_mut(&mut world);
            v.route_id = "route-ghost".to_string();
            v.progress = 42.0;
        }
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        step(&mut world, &mut schedule, 3);
        let v = vehicle(&mut world);
        assert_eq!(v.progress, 42.0);
        assert_eq!(v.current_stop_index, 0);
        assert!(
            !world.resource::<SimulationClock>().is_empty(),
            "the tick loop must survive a route miss"
        );
    }

    #[test]
    fn eta_drifts_down_and_floors_at_zero() {
        let mut world = create_test_world();
        world.insert_resource(EtaModel::with_probability(Some(1), 1.0));
        {
            let mut v = world.query::<&mut Vehicle>().single_mut(&mut world);
            v.eta_minutes = 1;
        }
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        step(&mut world, &mut schedule, 4);
        assert_eq!(vehicle(&mut world).eta_minutes, 0);
    }

    #[test]
    fn booking_marks_the_seat_and_records_one_entry() {
        let mut world = create_test_world();
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();
        step(&mut world, &mut schedule, 2);

        request_booking(&mut world, "v-test", "2B", 80.0);
        assert!(run_next_event(&mut world, &mut schedule));

        let v = vehicle(&mut world);
        assert!(v.seat("2B").expect("seat").booked);

        let ledger = world.resource::<BookingLedger>();
        assert_eq!(ledger.bookings.len(), 1);
        let record = &ledger.bookings[0];
        assert_eq!(record.vehicle_id, "v-test");
        assert_eq!(record.seat_id, "2B");
        assert_eq!(record.price, 80.0);
        assert_eq!(record.status, BookingStatus::Active);
        assert_eq!(record.timestamp, world.resource::<SimulationClock>().now());
    }

    #[test]
    fn double_booking_is_rejected_without_a_record() {
        let mut world = create_test_world();
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();
        step(&mut world, &mut schedule, 1);

        request_booking(&mut world, "v-test", "2B", 80.0);
        assert!(run_next_event(&mut world, &mut schedule));
        request_booking(&mut world, "v-test", "2B", 80.0);
        assert!(run_next_event(&mut world, &mut schedule));

        let v = vehicle(&mut world);
        assert!(v.seat("2B").expect("seat").booked);
        assert_eq!(world.resource::<BookingLedger>().bookings.len(), 1);
    }

    #[test]
    fn booking_unknown_vehicle_or_seat_is_a_silent_no_op() {
        let mut world = create_test_world();
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();
        step(&mut world, &mut schedule, 1);

        request_booking(&mut world, "v-ghost", "1A", 50.0);
        request_booking(&mut world, "v-test", "9Z", 50.0);
        while run_next_event(&mut world, &mut schedule) {
            if world
                .resource::<crate::systems::booking::PendingBookings>()
                .0
                .is_empty()
            {
                break;
            }
        }

        assert!(world.resource::<BookingLedger>().bookings.is_empty());
        let total = vehicle(&mut world).seats.len();
        assert_eq!(vehicle(&mut world).seats_available(), total);
    }

    #[test]
    fn snapshots_are_captured_at_the_configured_interval() {
        let mut world = create_test_world();
        initialize_simulation(&mut world);
        let mut schedule = simulation_schedule();

        // Start plus 30 ticks of 100ms. The first tick captures, then one
        // capture per elapsed second: t=100, 1100, 2100.
        step(&mut world, &mut schedule, 31);
        let snapshots = world.resource::<FleetSnapshots>();
        assert_eq!(snapshots.snapshots.len(), 3);
        assert_eq!(snapshots.last_snapshot_at, Some(2_100));
        for snapshot in &snapshots.snapshots {
            assert_eq!(snapshot.markers.len(), 1);
            assert_eq!(snapshot.markers[0].vehicle_id, "v-test");
        }
    }
}
