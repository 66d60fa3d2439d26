//! `VehicleRegistry`: id → record map shared by callers and navigation tasks.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use fleet_core::{ActorHandle, Point3, Status, Tick, VehicleId};
use fleet_world::WorldSim;

use crate::{RegistryError, RegistryResult};

#[cfg(feature = "fx-hash")]
type VehicleMap = rustc_hash::FxHashMap<VehicleId, VehicleRecord>;
#[cfg(not(feature = "fx-hash"))]
type VehicleMap = std::collections::HashMap<VehicleId, VehicleRecord>;

/// Registry-side state of one vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VehicleRecord {
    pub handle:     ActorHandle,
    pub status:     Status,
    /// Generation of the dispatch that currently owns the vehicle.
    pub generation: u64,
}

/// Point-in-time snapshot of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleTelemetry {
    pub position: Point3,
    pub yaw_deg:  f64,
    /// Ground speed in world units per second.
    pub speed:    f64,
    pub status:   Status,
    /// Clock tick the snapshot was taken at.
    pub tick:     Tick,
}

struct Inner {
    vehicles:        VehicleMap,
    next_generation: u64,
}

impl Inner {
    fn fresh_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

/// Thread-safe map of live vehicles.
///
/// All operations take the registry lock for the duration of the map access
/// only.  `spawn` is the one world call made under the lock, so two
/// concurrent `create_or_get` calls for the same id spawn exactly once.
pub struct VehicleRegistry<W: WorldSim> {
    world: Arc<W>,
    inner: Mutex<Inner>,
}

impl<W: WorldSim> VehicleRegistry<W> {
    pub fn new(world: Arc<W>) -> Self {
        Self {
            world,
            inner: Mutex::new(Inner { vehicles: VehicleMap::default(), next_generation: 0 }),
        }
    }

    pub fn world(&self) -> &Arc<W> {
        &self.world
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Handle for `id`, spawning a new actor the first time `id` is seen.
    ///
    /// A spawn failure leaves the registry unchanged.
    pub fn create_or_get(&self, id: &VehicleId) -> RegistryResult<ActorHandle> {
        let mut inner = self.inner.lock();
        if let Some(rec) = inner.vehicles.get(id) {
            return Ok(rec.handle);
        }
        let handle = self
            .world
            .spawn()
            .map_err(|source| RegistryError::SpawnFailed { id: id.clone(), source })?;
        let generation = inner.fresh_generation();
        inner
            .vehicles
            .insert(id.clone(), VehicleRecord { handle, status: Status::Spawned, generation });
        info!(vehicle = %id, %handle, "vehicle created");
        Ok(handle)
    }

    /// Remove `id` and destroy its actor.
    pub fn destroy(&self, id: &VehicleId) -> RegistryResult<()> {
        let rec = self
            .inner
            .lock()
            .vehicles
            .remove(id)
            .ok_or_else(|| RegistryError::UnknownVehicle(id.clone()))?;
        self.destroy_actor(id, rec.handle);
        Ok(())
    }

    /// Destroy every vehicle.  Returns how many were removed.
    pub fn destroy_all(&self) -> usize {
        let drained: Vec<(VehicleId, VehicleRecord)> =
            self.inner.lock().vehicles.drain().collect();
        for (id, rec) in &drained {
            self.destroy_actor(id, rec.handle);
        }
        info!(count = drained.len(), "all vehicles destroyed");
        drained.len()
    }

    fn destroy_actor(&self, id: &VehicleId, handle: ActorHandle) {
        match self.world.destroy(handle) {
            Ok(()) => info!(vehicle = %id, %handle, "vehicle destroyed"),
            // The record is gone either way; a world that already lost the
            // actor is not an error for the caller.
            Err(e) => warn!(vehicle = %id, %handle, error = %e, "actor already gone"),
        }
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn get(&self, id: &VehicleId) -> Option<ActorHandle> {
        self.inner.lock().vehicles.get(id).map(|r| r.handle)
    }

    pub fn record(&self, id: &VehicleId) -> Option<VehicleRecord> {
        self.inner.lock().vehicles.get(id).copied()
    }

    pub fn status(&self, id: &VehicleId) -> Option<Status> {
        self.inner.lock().vehicles.get(id).map(|r| r.status)
    }

    pub fn generation(&self, id: &VehicleId) -> Option<u64> {
        self.inner.lock().vehicles.get(id).map(|r| r.generation)
    }

    /// Live position from the world.  `None` if the id is unknown or the
    /// world no longer knows the actor.
    pub fn current_position(&self, id: &VehicleId) -> Option<Point3> {
        let handle = self.get(id)?;
        self.world.transform(handle).ok().map(|t| t.location)
    }

    /// Live snapshot of `id` stamped with `tick`.
    pub fn telemetry(&self, id: &VehicleId, tick: Tick) -> Option<VehicleTelemetry> {
        let rec = self.record(id)?;
        let transform = self.world.transform(rec.handle).ok()?;
        let velocity = self.world.velocity(rec.handle).ok()?;
        Some(VehicleTelemetry {
            position: transform.location,
            yaw_deg:  transform.yaw_deg,
            speed:    velocity.length(),
            status:   rec.status,
            tick,
        })
    }

    /// All live ids, sorted.
    pub fn ids(&self) -> Vec<VehicleId> {
        let mut ids: Vec<VehicleId> = self.inner.lock().vehicles.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.lock().vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().vehicles.is_empty()
    }

    // ── Status ────────────────────────────────────────────────────────────

    pub fn set_status(&self, id: &VehicleId, status: Status) -> RegistryResult<()> {
        let mut inner = self.inner.lock();
        let rec = inner
            .vehicles
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownVehicle(id.clone()))?;
        rec.status = status;
        debug!(vehicle = %id, %status, "status set");
        Ok(())
    }

    /// Claim `id` for a new dispatch: fresh generation, status `InTransit`.
    pub fn begin_dispatch(&self, id: &VehicleId) -> RegistryResult<(ActorHandle, u64)> {
        let mut inner = self.inner.lock();
        let generation = inner.fresh_generation();
        let rec = inner
            .vehicles
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownVehicle(id.clone()))?;
        rec.generation = generation;
        rec.status = Status::InTransit;
        debug!(vehicle = %id, generation, "dispatch claimed");
        Ok((rec.handle, generation))
    }

    /// Set the status only while `generation` still owns the vehicle.
    ///
    /// Returns `false` if the vehicle is gone or was claimed by a newer
    /// dispatch.
    pub fn set_status_if_current(&self, id: &VehicleId, generation: u64, status: Status) -> bool {
        let mut inner = self.inner.lock();
        match inner.vehicles.get_mut(id) {
            Some(rec) if rec.generation == generation => {
                rec.status = status;
                debug!(vehicle = %id, generation, %status, "status set");
                true
            }
            _ => false,
        }
    }

    /// `true` while `generation` still owns the vehicle.
    pub fn is_current(&self, id: &VehicleId, generation: u64) -> bool {
        self.generation(id) == Some(generation)
    }
}
