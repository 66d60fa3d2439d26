//! Unit tests for fleet-nav.
//!
//! Tasks run on real threads against a `KinematicWorld`.  Tests that need
//! motion run the clock at a 2 ms period and bound every leg with
//! `max_ticks_per_leg` so a regression fails instead of hanging.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use fleet_clock::WorldClock;
    use fleet_core::{NavConfig, Point3, Status, VehicleId};
    use fleet_registry::VehicleRegistry;
    use fleet_world::{KinematicWorld, Transform};

    use crate::{NavObserver, NavOutcome, Navigator};

    pub struct Rig {
        pub registry:  Arc<VehicleRegistry<KinematicWorld>>,
        pub clock:     WorldClock<KinematicWorld>,
        pub navigator: Navigator<KinematicWorld>,
    }

    impl Rig {
        pub fn world(&self) -> &KinematicWorld {
            self.registry.world()
        }
    }

    pub fn config() -> NavConfig {
        NavConfig {
            max_ticks_per_leg: Some(5_000),
            idle_poll: Duration::from_millis(10),
            ..NavConfig::default()
        }
    }

    pub fn rig_with(config: NavConfig) -> Rig {
        let world = Arc::new(KinematicWorld::with_spawn_point(Transform::new(Point3::ORIGIN, 0.0)));
        let registry = Arc::new(VehicleRegistry::new(Arc::clone(&world)));
        let clock = WorldClock::new(world, Duration::from_millis(2));
        let navigator = Navigator::new(Arc::clone(&registry), clock.signal(), config);
        Rig { registry, clock, navigator }
    }

    pub fn rig() -> Rig {
        rig_with(config())
    }

    /// Records every callback as a line of text.
    #[derive(Default)]
    pub struct Recorder {
        pub events: Mutex<Vec<String>>,
    }

    impl NavObserver for Recorder {
        fn on_status(&self, id: &VehicleId, status: Status) {
            self.events.lock().push(format!("{id} status {status}"));
        }

        fn on_waypoint(&self, id: &VehicleId, index: usize, _point: Point3) {
            self.events.lock().push(format!("{id} waypoint {index}"));
        }

        fn on_finished(&self, id: &VehicleId, outcome: NavOutcome) {
            self.events.lock().push(format!("{id} finished {outcome}"));
        }
    }

    /// Panics inside the task thread at the first reached waypoint.
    pub struct PanicOnWaypoint;

    impl NavObserver for PanicOnWaypoint {
        fn on_waypoint(&self, _id: &VehicleId, _index: usize, _point: Point3) {
            panic!("observer failure");
        }
    }
}

// ── Steering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod steering {
    use fleet_core::{NavConfig, Point3, SteeringPolicy};
    use fleet_world::Transform;

    use crate::steer_toward;

    #[test]
    fn straight_never_steers() {
        let cfg = NavConfig { steering: SteeringPolicy::Straight, ..NavConfig::default() };
        let pose = Transform::new(Point3::ORIGIN, 0.0);
        assert_eq!(steer_toward(&pose, Point3::new(0.0, 10.0, 0.0), &cfg), 0.0);
    }

    #[test]
    fn pursue_is_proportional_then_saturates() {
        let cfg = NavConfig::default();
        let pose = Transform::new(Point3::ORIGIN, 0.0);
        assert_eq!(steer_toward(&pose, Point3::new(10.0, 0.0, 0.0), &cfg), 0.0);
        assert_eq!(steer_toward(&pose, Point3::new(0.0, 10.0, 0.0), &cfg), 1.0);
        assert_eq!(steer_toward(&pose, Point3::new(0.0, -10.0, 0.0), &cfg), -1.0);

        let half = steer_toward(&pose, Point3::from_heading_deg(22.5).scale(10.0), &cfg);
        assert!((half - 0.5).abs() < 1e-6, "steer {half}");
    }

    #[test]
    fn pursue_wraps_across_180() {
        let cfg = NavConfig::default();
        // Facing 170°, target at -170°: a 20° left turn, not 340° right.
        let pose = Transform::new(Point3::ORIGIN, 170.0);
        let steer = steer_toward(&pose, Point3::from_heading_deg(-170.0).scale(10.0), &cfg);
        assert!(steer > 0.0);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use std::sync::Arc;
    use std::time::Duration;

    use fleet_core::{NavConfig, Point3, Route, Status, SteeringPolicy, Tick, VehicleId};
    use fleet_world::{VehicleControl, WorldSim};

    use super::helpers::{PanicOnWaypoint, Recorder, config, rig, rig_with};
    use crate::{FailReason, NavError, NavOutcome};

    #[test]
    fn unknown_vehicle_is_rejected() {
        let rig = rig();
        let err = rig.navigator.dispatch(&VehicleId::new("ghost"), Point3::ORIGIN).unwrap_err();
        assert!(matches!(err, NavError::UnknownVehicle(_)));
    }

    #[test]
    fn target_at_current_position_delivers_without_throttle() {
        let rig = rig();
        let id = VehicleId::new("v1");
        let h = rig.registry.create_or_get(&id).unwrap();

        // Clock not running: arrival needs no tick.
        let outcome = rig.navigator.dispatch(&id, Point3::new(0.5, 0.0, 0.0)).unwrap().join();
        assert_eq!(outcome, NavOutcome::Delivered);
        assert_eq!(rig.registry.status(&id), Some(Status::Delivered));
        assert_eq!(rig.world().controls_applied(h), Some(1));
        assert_eq!(rig.world().current_control(h), Some(VehicleControl::STOP));
    }

    #[test]
    fn empty_route_delivers_immediately() {
        let rig = rig();
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        let outcome = rig.navigator.dispatch_route(&id, Route::empty()).unwrap().join();
        assert_eq!(outcome, NavOutcome::Delivered);
        assert_eq!(rig.registry.status(&id), Some(Status::Delivered));
    }

    #[test]
    fn drives_to_point_ahead() {
        let rig = rig();
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();

        let handle = rig.navigator.dispatch(&id, Point3::new(20.0, 0.0, 0.0)).unwrap();
        assert_eq!(rig.registry.status(&id), Some(Status::InTransit));
        assert_eq!(handle.join(), NavOutcome::Delivered);
        rig.clock.stop();

        assert_eq!(rig.registry.status(&id), Some(Status::Delivered));
        let pos = rig.registry.current_position(&id).unwrap();
        // Braking distance from cruise speed is under two units.
        assert!(pos.distance(Point3::new(20.0, 0.0, 0.0)) < 3.0, "ended at {pos}");
    }

    #[test]
    fn pursue_reaches_target_off_axis() {
        let rig = rig();
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();
        let outcome = rig.navigator.dispatch(&id, Point3::new(0.0, 15.0, 0.0)).unwrap().join();
        rig.clock.stop();
        assert_eq!(outcome, NavOutcome::Delivered);
    }

    #[test]
    fn multi_stop_visits_in_order() {
        let rig = rig();
        let recorder = Arc::new(Recorder::default());
        let navigator = crate::Navigator::new(
            Arc::clone(&rig.registry),
            rig.clock.signal(),
            config(),
        )
        .with_observer(recorder.clone());

        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();
        let route = Route::from_tuples([(8.0, 0.0, 0.0), (16.0, 0.0, 0.0), (24.0, 0.0, 0.0)]);
        let outcome = navigator.dispatch_route(&id, route).unwrap().join();
        rig.clock.stop();

        assert_eq!(outcome, NavOutcome::Delivered);
        assert_eq!(
            *recorder.events.lock(),
            vec![
                "v1 status in_transit",
                "v1 waypoint 0",
                "v1 waypoint 1",
                "v1 waypoint 2",
                "v1 status delivered",
                "v1 finished delivered",
            ]
        );
    }

    #[test]
    fn destroy_mid_flight_fails_task() {
        let rig = rig();
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();

        let handle = rig.navigator.dispatch(&id, Point3::new(1_000.0, 0.0, 0.0)).unwrap();
        rig.clock.signal().wait_past(Tick(5), Duration::from_secs(5)).unwrap();
        rig.registry.destroy(&id).unwrap();

        assert_eq!(handle.join(), NavOutcome::Failed(FailReason::VehicleGone));
        assert_eq!(rig.registry.status(&id), None);
        rig.clock.stop();
    }

    #[test]
    fn world_losing_actor_fails_and_marks_status() {
        let rig = rig();
        let id = VehicleId::new("v1");
        let h = rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();

        let handle = rig.navigator.dispatch(&id, Point3::new(1_000.0, 0.0, 0.0)).unwrap();
        rig.clock.signal().wait_past(Tick(5), Duration::from_secs(5)).unwrap();
        // Actor removed behind the registry's back.
        rig.world().destroy(h).unwrap();

        assert_eq!(handle.join(), NavOutcome::Failed(FailReason::VehicleGone));
        assert_eq!(rig.registry.status(&id), Some(Status::Failed));
        rig.clock.stop();
    }

    #[test]
    fn redispatch_cancels_prior_task() {
        let rig = rig();
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();

        let first = rig.navigator.dispatch(&id, Point3::new(1_000.0, 0.0, 0.0)).unwrap();
        let second = rig.navigator.dispatch(&id, Point3::new(6.0, 0.0, 0.0)).unwrap();
        assert!(second.generation() > first.generation());

        assert_eq!(first.join(), NavOutcome::Cancelled);
        assert_eq!(second.join(), NavOutcome::Delivered);
        rig.clock.stop();
        assert_eq!(rig.registry.status(&id), Some(Status::Delivered));
    }

    #[test]
    fn explicit_cancel_parks_vehicle() {
        let rig = rig();
        let id = VehicleId::new("v1");
        let h = rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();

        let handle = rig.navigator.dispatch(&id, Point3::new(1_000.0, 0.0, 0.0)).unwrap();
        rig.clock.signal().wait_past(Tick(3), Duration::from_secs(5)).unwrap();
        assert_eq!(rig.navigator.in_flight(), vec![id.clone()]);
        assert!(rig.navigator.cancel(&id));
        assert!(!rig.navigator.cancel(&id));

        assert_eq!(handle.join(), NavOutcome::Cancelled);
        rig.clock.stop();
        assert_eq!(rig.world().current_control(h), Some(VehicleControl::STOP));
        assert_eq!(rig.registry.status(&id), Some(Status::InTransit));
        assert!(rig.navigator.in_flight().is_empty());
    }

    #[test]
    fn cancel_honoured_while_clock_is_stopped() {
        let rig = rig();
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();

        let handle = rig.navigator.dispatch(&id, Point3::new(50.0, 0.0, 0.0)).unwrap();
        handle.cancel();
        assert_eq!(handle.join(), NavOutcome::Cancelled);
    }

    #[test]
    fn leg_budget_times_out() {
        let rig = rig_with(NavConfig {
            steering: SteeringPolicy::Straight,
            max_ticks_per_leg: Some(50),
            ..config()
        });
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        rig.clock.start().unwrap();

        // Straight steering never turns toward a target off the x axis.
        let outcome = rig.navigator.dispatch(&id, Point3::new(0.0, 15.0, 0.0)).unwrap().join();
        rig.clock.stop();
        assert_eq!(outcome, NavOutcome::Failed(FailReason::TimedOut));
        assert_eq!(rig.registry.status(&id), Some(Status::Failed));
    }

    #[test]
    fn cancel_all_stops_every_task() {
        let rig = rig();
        let ids: Vec<VehicleId> = (0..3).map(|i| VehicleId::new(format!("v{i}"))).collect();
        let handles: Vec<_> = ids
            .iter()
            .map(|id| {
                rig.registry.create_or_get(id).unwrap();
                rig.navigator.dispatch(id, Point3::new(500.0, 0.0, 0.0)).unwrap()
            })
            .collect();
        assert_eq!(rig.navigator.cancel_all(), 3);
        for h in handles {
            assert_eq!(h.join(), NavOutcome::Cancelled);
        }
    }

    #[test]
    fn panicked_task_is_no_longer_in_flight() {
        let rig = rig();
        let navigator =
            crate::Navigator::new(Arc::clone(&rig.registry), rig.clock.signal(), config())
                .with_observer(Arc::new(PanicOnWaypoint));
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();

        let handle = navigator.dispatch(&id, Point3::ORIGIN).unwrap();
        assert_eq!(handle.join(), NavOutcome::Failed(FailReason::Panicked));
        assert!(navigator.in_flight().is_empty());
        assert!(!navigator.cancel(&id));
    }

    #[test]
    fn finished_tasks_are_pruned_on_dispatch() {
        let rig = rig();
        let first = VehicleId::new("v1");
        let second = VehicleId::new("v2");
        rig.registry.create_or_get(&first).unwrap();
        rig.registry.create_or_get(&second).unwrap();

        let outcome = rig.navigator.dispatch_route(&first, Route::empty()).unwrap().join();
        assert_eq!(outcome, NavOutcome::Delivered);
        rig.registry.destroy(&first).unwrap();
        assert_eq!(rig.navigator.tracked(), 1);

        rig.navigator.dispatch_route(&second, Route::empty()).unwrap().join();
        assert_eq!(rig.navigator.tracked(), 1);
    }

    #[test]
    fn handle_debug_names_vehicle() {
        let rig = rig();
        let id = VehicleId::new("v1");
        rig.registry.create_or_get(&id).unwrap();
        let handle = rig.navigator.dispatch_route(&id, Route::empty()).unwrap();
        assert!(format!("{handle:?}").contains("v1"));
        handle.join();
    }
}
