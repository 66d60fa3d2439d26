//! Fluent builder for constructing a [`Fleet`].

use std::sync::Arc;

use fleet_clock::WorldClock;
use fleet_core::FleetConfig;
use fleet_nav::{NavObserver, Navigator, NoopObserver};
use fleet_planner::{NearestNeighborPlanner, RoutePlanner};
use fleet_registry::VehicleRegistry;
use fleet_store::LocationStore;
use fleet_world::WorldSim;

use crate::{Fleet, FleetResult};

/// Fluent builder for [`Fleet<W, S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                   |
/// |-----------------|---------------------------|
/// | `.config(c)`    | `FleetConfig::default()`  |
/// | `.planner(p)`   | `NearestNeighborPlanner`  |
/// | `.observer(o)`  | `NoopObserver`            |
pub struct FleetBuilder<W: WorldSim, S: LocationStore> {
    world:    Arc<W>,
    store:    Arc<S>,
    config:   FleetConfig,
    planner:  Arc<dyn RoutePlanner>,
    observer: Arc<dyn NavObserver>,
}

impl<W: WorldSim, S: LocationStore> FleetBuilder<W, S> {
    pub fn new(world: Arc<W>, store: Arc<S>) -> Self {
        Self {
            world,
            store,
            config:   FleetConfig::default(),
            planner:  Arc::new(NearestNeighborPlanner),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn config(mut self, config: FleetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn planner(mut self, planner: impl RoutePlanner + 'static) -> Self {
        self.planner = Arc::new(planner);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn NavObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Validate the configuration and assemble the fleet.  The clock is not
    /// started.
    pub fn build(self) -> FleetResult<Fleet<W, S>> {
        self.config.validate()?;

        let registry = Arc::new(VehicleRegistry::new(Arc::clone(&self.world)));
        let clock = WorldClock::new(self.world, self.config.tick_period());
        let navigator =
            Navigator::new(Arc::clone(&registry), clock.signal(), self.config.nav_config())
                .with_observer(self.observer);

        Ok(Fleet::from_parts(self.config, self.store, self.planner, registry, clock, navigator))
    }
}
