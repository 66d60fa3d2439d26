//! The per-dispatch driving loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use fleet_clock::TickSignal;
use fleet_core::geo::yaw_error_deg;
use fleet_core::{ActorHandle, NavConfig, Point3, Route, Status, SteeringPolicy, Tick, VehicleId};
use fleet_registry::VehicleRegistry;
use fleet_world::{Transform, VehicleControl, WorldSim};

use crate::{FailReason, NavObserver, NavOutcome};

/// Steering input that turns a vehicle with pose `from` toward `target`.
///
/// Positive steer turns toward increasing yaw.  `Straight` always returns 0.
/// `PursueTarget` is proportional to the yaw error and saturates at
/// `full_lock_yaw_deg`.
pub fn steer_toward(from: &Transform, target: Point3, config: &NavConfig) -> f32 {
    match config.steering {
        SteeringPolicy::Straight => 0.0,
        SteeringPolicy::PursueTarget => {
            let desired = (target - from.location).heading_deg();
            let error = yaw_error_deg(from.yaw_deg, desired);
            (error / config.full_lock_yaw_deg).clamp(-1.0, 1.0) as f32
        }
    }
}

/// Why the driving loop stopped before the last target.
enum Halt {
    /// Record removed, or the world rejected the actor handle.
    Gone,
    /// A newer dispatch claimed the vehicle.
    Superseded,
    Cancelled,
    TimedOut,
}

/// Marks a task finished when the thread exits, unwinding included.
pub(crate) struct DoneGuard(pub Arc<AtomicBool>);

impl Drop for DoneGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

pub(crate) struct NavTask<W: WorldSim> {
    pub vehicle:    VehicleId,
    pub handle:     ActorHandle,
    pub generation: u64,
    pub route:      Route,
    pub registry:   Arc<VehicleRegistry<W>>,
    pub signal:     Arc<TickSignal>,
    pub config:     NavConfig,
    pub observer:   Arc<dyn NavObserver>,
    pub cancel:     Arc<AtomicBool>,
}

impl<W: WorldSim> NavTask<W> {
    pub fn run(self) -> NavOutcome {
        info!(
            vehicle = %self.vehicle,
            targets = self.route.len(),
            generation = self.generation,
            "navigation started"
        );
        let outcome = match self.drive() {
            Ok(()) => self.finish(Status::Delivered, NavOutcome::Delivered),
            Err(Halt::Gone) => {
                self.finish(Status::Failed, NavOutcome::Failed(FailReason::VehicleGone))
            }
            Err(Halt::TimedOut) => {
                self.park();
                self.finish(Status::Failed, NavOutcome::Failed(FailReason::TimedOut))
            }
            Err(Halt::Cancelled) => {
                self.park();
                NavOutcome::Cancelled
            }
            Err(Halt::Superseded) => NavOutcome::Cancelled,
        };
        self.observer.on_finished(&self.vehicle, outcome);
        info!(vehicle = %self.vehicle, generation = self.generation, %outcome, "navigation finished");
        outcome
    }

    fn world(&self) -> &W {
        self.registry.world()
    }

    /// Brake, ignoring a handle the world no longer knows.
    fn park(&self) {
        let _ = self.world().apply_control(self.handle, VehicleControl::STOP);
    }

    /// Write the terminal status if this dispatch still owns the vehicle.
    fn finish(&self, status: Status, outcome: NavOutcome) -> NavOutcome {
        if self.registry.set_status_if_current(&self.vehicle, self.generation, status) {
            self.observer.on_status(&self.vehicle, status);
            outcome
        } else if self.registry.get(&self.vehicle).is_none() {
            NavOutcome::Failed(FailReason::VehicleGone)
        } else {
            NavOutcome::Cancelled
        }
    }

    /// Registry-side checks made before every world interaction.
    fn check(&self) -> Result<(), Halt> {
        match self.registry.generation(&self.vehicle) {
            None => Err(Halt::Gone),
            Some(g) if g != self.generation => Err(Halt::Superseded),
            Some(_) if self.cancel.load(Ordering::Acquire) => Err(Halt::Cancelled),
            Some(_) => Ok(()),
        }
    }

    fn drive(&self) -> Result<(), Halt> {
        let mut seen = self.signal.current();
        for (index, raw) in self.route.iter().enumerate() {
            let target = self.world().snap_to_map(*raw);
            debug!(vehicle = %self.vehicle, index, %target, "leg started");
            self.drive_leg(target, &mut seen)?;
            debug!(vehicle = %self.vehicle, index, tick = %seen, "target reached");
            self.observer.on_waypoint(&self.vehicle, index, target);
        }
        Ok(())
    }

    fn drive_leg(&self, target: Point3, seen: &mut Tick) -> Result<(), Halt> {
        let leg_start = *seen;
        loop {
            self.check()?;
            let pose = self.world().transform(self.handle).map_err(|_| Halt::Gone)?;
            let offset = target - pose.location;

            if offset.length() <= self.config.arrival_threshold || offset.normalize().is_none() {
                self.world()
                    .apply_control(self.handle, VehicleControl::STOP)
                    .map_err(|_| Halt::Gone)?;
                return Ok(());
            }
            if let Some(budget) = self.config.max_ticks_per_leg {
                if seen.since(leg_start) >= budget {
                    return Err(Halt::TimedOut);
                }
            }

            let steer = steer_toward(&pose, target, &self.config);
            self.world()
                .apply_control(self.handle, VehicleControl::drive(self.config.cruise_throttle, steer))
                .map_err(|_| Halt::Gone)?;
            *seen = self.wait_for_tick(*seen)?;
        }
    }

    /// Block until the clock publishes a tick after `seen`, re-checking
    /// ownership every `idle_poll` while the clock is quiet.
    fn wait_for_tick(&self, seen: Tick) -> Result<Tick, Halt> {
        loop {
            if let Some(tick) = self.signal.wait_past(seen, self.config.idle_poll) {
                return Ok(tick);
            }
            self.check()?;
        }
    }
}
