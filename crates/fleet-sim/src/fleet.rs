//! The `Fleet` facade.

use std::sync::Arc;

use tracing::info;

use fleet_clock::{ClockState, WorldClock};
use fleet_core::{FleetConfig, Point3, Route, ScheduleId, Status, Stop, Tick, VehicleId};
use fleet_nav::{DispatchHandle, Navigator};
use fleet_planner::{RoutePlanner, plan_stops, route_for_schedule};
use fleet_registry::{VehicleRegistry, VehicleTelemetry};
use fleet_store::LocationStore;
use fleet_world::{SpawnPoint, WorldSim};

use crate::FleetResult;

/// Where a dispatch sends a vehicle.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchTarget {
    /// A single point.
    Point(Point3),
    /// Pre-ordered points, visited in order.
    Route(Route),
    /// A stored schedule; its route is planned (and cached) on demand.
    Schedule(ScheduleId),
}

impl From<Point3> for DispatchTarget {
    fn from(p: Point3) -> Self {
        DispatchTarget::Point(p)
    }
}

impl From<Route> for DispatchTarget {
    fn from(r: Route) -> Self {
        DispatchTarget::Route(r)
    }
}

/// One dispatch system over a world `W` and a store `S`.
///
/// Built with [`FleetBuilder`](crate::FleetBuilder).  Dropping the fleet
/// cancels every running dispatch and stops the clock, like
/// [`shutdown`](Self::shutdown).
pub struct Fleet<W: WorldSim, S: LocationStore> {
    config:    FleetConfig,
    store:     Arc<S>,
    planner:   Arc<dyn RoutePlanner>,
    registry:  Arc<VehicleRegistry<W>>,
    clock:     WorldClock<W>,
    navigator: Navigator<W>,
}

impl<W: WorldSim, S: LocationStore> Fleet<W, S> {
    pub(crate) fn from_parts(
        config: FleetConfig,
        store: Arc<S>,
        planner: Arc<dyn RoutePlanner>,
        registry: Arc<VehicleRegistry<W>>,
        clock: WorldClock<W>,
        navigator: Navigator<W>,
    ) -> Self {
        Self { config, store, planner, registry, clock, navigator }
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Order `stops` into a route.  Stops that do not resolve are dropped.
    pub fn plan_route(&self, stops: &[Stop]) -> FleetResult<Route> {
        Ok(plan_stops(&*self.planner, &*self.store, stops)?)
    }

    /// Route for a stored schedule, planned and saved on first use.
    pub fn plan_schedule(&self, id: &ScheduleId) -> FleetResult<Route> {
        Ok(route_for_schedule(&*self.planner, &*self.store, id)?)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Send vehicle `id` to `target`, creating the vehicle on first use.
    ///
    /// Returns once the navigation task is running.  A previous dispatch of
    /// the same vehicle is cancelled.
    pub fn dispatch_vehicle(
        &self,
        id: &VehicleId,
        target: DispatchTarget,
    ) -> FleetResult<DispatchHandle> {
        let route = match target {
            DispatchTarget::Point(p) => Route::new(vec![p]),
            DispatchTarget::Route(r) => r,
            DispatchTarget::Schedule(schedule) => self.plan_schedule(&schedule)?,
        };
        self.registry.create_or_get(id)?;
        info!(vehicle = %id, targets = route.len(), "dispatching");
        Ok(self.navigator.dispatch_route(id, route)?)
    }

    /// Cancel the running dispatch of `id`.  Returns `false` if none.
    pub fn cancel_dispatch(&self, id: &VehicleId) -> bool {
        self.navigator.cancel(id)
    }

    pub fn in_flight(&self) -> Vec<VehicleId> {
        self.navigator.in_flight()
    }

    // ── Vehicles ──────────────────────────────────────────────────────────

    pub fn vehicle_status(&self, id: &VehicleId) -> Option<Status> {
        self.registry.status(id)
    }

    pub fn vehicle_position(&self, id: &VehicleId) -> Option<Point3> {
        self.registry.current_position(id)
    }

    pub fn vehicle_telemetry(&self, id: &VehicleId) -> Option<VehicleTelemetry> {
        self.registry.telemetry(id, self.clock.current_tick())
    }

    pub fn vehicles(&self) -> Vec<VehicleId> {
        self.registry.ids()
    }

    pub fn destroy_vehicle(&self, id: &VehicleId) -> FleetResult<()> {
        Ok(self.registry.destroy(id)?)
    }

    /// Destroy every vehicle.  Running dispatches end as failed.
    pub fn destroy_all_vehicles(&self) -> usize {
        self.registry.destroy_all()
    }

    pub fn spawn_points(&self) -> Vec<SpawnPoint> {
        self.registry.world().spawn_points()
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    pub fn start_clock(&self) -> FleetResult<ClockState> {
        Ok(self.clock.start()?)
    }

    pub fn stop_clock(&self) -> ClockState {
        self.clock.stop()
    }

    /// Advance one tick by hand.  Refused while the clock runs.
    pub fn step_clock(&self) -> FleetResult<Tick> {
        Ok(self.clock.step()?)
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    /// Cancel every dispatch and stop the clock.
    pub fn shutdown(&self) {
        let cancelled = self.navigator.cancel_all();
        let clock = self.clock.stop();
        info!(cancelled, ?clock, "fleet shut down");
    }

    // ── Parts ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn world(&self) -> &Arc<W> {
        self.registry.world()
    }

    pub fn registry(&self) -> &Arc<VehicleRegistry<W>> {
        &self.registry
    }

    pub fn clock(&self) -> &WorldClock<W> {
        &self.clock
    }
}

impl<W: WorldSim, S: LocationStore> Drop for Fleet<W, S> {
    fn drop(&mut self) {
        let cancelled = self.navigator.cancel_all();
        if cancelled > 0 {
            info!(cancelled, "fleet dropped with dispatches in flight");
        }
    }
}
