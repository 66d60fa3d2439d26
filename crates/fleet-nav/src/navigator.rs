//! `Navigator`: starts, supersedes, and cancels navigation tasks.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use parking_lot::Mutex;
use tracing::{info, warn};

use fleet_clock::TickSignal;
use fleet_core::{NavConfig, Point3, Route, Status, VehicleId};
use fleet_registry::VehicleRegistry;
use fleet_world::WorldSim;

use crate::task::{DoneGuard, NavTask};
use crate::{DispatchHandle, NavError, NavObserver, NavResult, NoopObserver};

/// Bookkeeping for the latest task of one vehicle.
struct TaskEntry {
    generation: u64,
    cancel:     Arc<AtomicBool>,
    done:       Arc<AtomicBool>,
}

impl TaskEntry {
    fn is_live(&self) -> bool {
        !self.done.load(Ordering::Acquire)
    }
}

/// Launches one navigation thread per dispatch.
///
/// At most one task per vehicle is live: dispatching a vehicle that already
/// has a task cancels the old one first.
pub struct Navigator<W: WorldSim> {
    registry: Arc<VehicleRegistry<W>>,
    signal:   Arc<TickSignal>,
    config:   NavConfig,
    observer: Arc<dyn NavObserver>,
    tasks:    Mutex<HashMap<VehicleId, TaskEntry>>,
}

impl<W: WorldSim> Navigator<W> {
    pub fn new(
        registry: Arc<VehicleRegistry<W>>,
        signal: Arc<TickSignal>,
        config: NavConfig,
    ) -> Self {
        Self {
            registry,
            signal,
            config,
            observer: Arc::new(NoopObserver),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn NavObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Drive `id` to a single point.
    pub fn dispatch(&self, id: &VehicleId, target: Point3) -> NavResult<DispatchHandle> {
        self.dispatch_route(id, Route::new(vec![target]))
    }

    /// Drive `id` through `route` in order.
    ///
    /// Returns as soon as the task is running.  Fails only if `id` is not
    /// registered or the thread cannot be spawned.
    pub fn dispatch_route(&self, id: &VehicleId, route: Route) -> NavResult<DispatchHandle> {
        let mut tasks = self.tasks.lock();

        let (handle, generation) = self
            .registry
            .begin_dispatch(id)
            .map_err(|_| NavError::UnknownVehicle(id.clone()))?;
        if let Some(prev) = tasks.remove(id) {
            prev.cancel.store(true, Ordering::Release);
            if prev.is_live() {
                info!(vehicle = %id, old = prev.generation, new = generation, "dispatch superseded");
            }
        }
        self.observer.on_status(id, Status::InTransit);

        let cancel = Arc::new(AtomicBool::new(false));
        let done = Arc::new(AtomicBool::new(false));
        let task = NavTask {
            vehicle: id.clone(),
            handle,
            generation,
            route,
            registry: Arc::clone(&self.registry),
            signal: Arc::clone(&self.signal),
            config: self.config.clone(),
            observer: Arc::clone(&self.observer),
            cancel: Arc::clone(&cancel),
        };

        let guard = DoneGuard(Arc::clone(&done));
        let thread = match thread::Builder::new().name(format!("nav-{id}")).spawn(move || {
            let _guard = guard;
            task.run()
        }) {
            Ok(thread) => thread,
            Err(e) => {
                warn!(vehicle = %id, error = %e, "could not start navigation thread");
                if self.registry.set_status_if_current(id, generation, Status::Failed) {
                    self.observer.on_status(id, Status::Failed);
                }
                return Err(NavError::Spawn(e));
            }
        };

        tasks.retain(|_, entry| entry.is_live());
        tasks.insert(id.clone(), TaskEntry { generation, cancel: Arc::clone(&cancel), done });
        Ok(DispatchHandle::new(id.clone(), generation, cancel, thread))
    }

    /// Cancel the live task of `id`.  Returns `false` if there was none.
    pub fn cancel(&self, id: &VehicleId) -> bool {
        match self.tasks.lock().remove(id) {
            Some(entry) if entry.is_live() => {
                entry.cancel.store(true, Ordering::Release);
                info!(vehicle = %id, generation = entry.generation, "dispatch cancelled");
                true
            }
            _ => false,
        }
    }

    /// Cancel every live task.  Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<(VehicleId, TaskEntry)> = self.tasks.lock().drain().collect();
        let mut cancelled = 0;
        for (_, entry) in drained.into_iter().filter(|(_, entry)| entry.is_live()) {
            entry.cancel.store(true, Ordering::Release);
            cancelled += 1;
        }
        if cancelled > 0 {
            info!(count = cancelled, "all dispatches cancelled");
        }
        cancelled
    }

    /// Vehicles with a task still running, sorted.
    pub fn in_flight(&self) -> Vec<VehicleId> {
        let mut tasks = self.tasks.lock();
        tasks.retain(|_, entry| entry.is_live());
        let mut ids: Vec<VehicleId> = tasks.keys().cloned().collect();
        ids.sort();
        ids
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.tasks.lock().len()
    }
}
