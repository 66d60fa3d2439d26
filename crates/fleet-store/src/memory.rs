//! In-memory `LocationStore`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::RwLock;
use tracing::debug;

use fleet_core::{LocationId, Point3, Route, ScheduleId, Stop};

use crate::{LocationStore, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    locations: HashMap<LocationId, Point3>,
    stops:     HashMap<Stop, LocationId>,
    routes:    HashMap<ScheduleId, Route>,
    schedules: HashMap<ScheduleId, Vec<Stop>>,
}

/// Store backed by plain hash maps.  Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_key<K: Ord + Clone, V: Clone>(map: &HashMap<K, V>) -> Vec<(K, V)> {
    let mut out: Vec<(K, V)> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

impl LocationStore for MemoryStore {
    fn register_location(&self, id: &LocationId, point: Point3) -> StoreResult<()> {
        match self.tables.write().locations.entry(id.clone()) {
            Entry::Occupied(_) => Err(StoreError::location_taken(id)),
            Entry::Vacant(slot) => {
                slot.insert(point);
                debug!(location = %id, %point, "location registered");
                Ok(())
            }
        }
    }

    fn register_stop(&self, stop: &Stop, location: &LocationId) -> StoreResult<()> {
        match self.tables.write().stops.entry(stop.clone()) {
            Entry::Occupied(_) => Err(StoreError::stop_taken(stop)),
            Entry::Vacant(slot) => {
                slot.insert(location.clone());
                debug!(%stop, %location, "stop registered");
                Ok(())
            }
        }
    }

    fn resolve_stop(&self, stop: &Stop) -> StoreResult<Option<LocationId>> {
        Ok(self.tables.read().stops.get(stop).cloned())
    }

    fn resolve_location(&self, id: &LocationId) -> StoreResult<Option<Point3>> {
        Ok(self.tables.read().locations.get(id).copied())
    }

    fn locations(&self) -> StoreResult<Vec<(LocationId, Point3)>> {
        Ok(sorted_by_key(&self.tables.read().locations))
    }

    fn save_route(&self, id: &ScheduleId, route: &Route) -> StoreResult<()> {
        self.tables.write().routes.insert(id.clone(), route.clone());
        debug!(schedule = %id, points = route.len(), "route saved");
        Ok(())
    }

    fn load_route(&self, id: &ScheduleId) -> StoreResult<Option<Route>> {
        Ok(self.tables.read().routes.get(id).cloned())
    }

    fn delete_route(&self, id: &ScheduleId) -> StoreResult<bool> {
        Ok(self.tables.write().routes.remove(id).is_some())
    }

    fn routes(&self) -> StoreResult<Vec<ScheduleId>> {
        let mut ids: Vec<ScheduleId> = self.tables.read().routes.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn create_schedule(&self, id: &ScheduleId, stops: &[Stop]) -> StoreResult<bool> {
        match self.tables.write().schedules.entry(id.clone()) {
            Entry::Occupied(_) => {
                debug!(schedule = %id, "schedule already exists");
                Ok(false)
            }
            Entry::Vacant(slot) => {
                slot.insert(stops.to_vec());
                debug!(schedule = %id, stops = stops.len(), "schedule created");
                Ok(true)
            }
        }
    }

    fn schedule(&self, id: &ScheduleId) -> StoreResult<Option<Vec<Stop>>> {
        Ok(self.tables.read().schedules.get(id).cloned())
    }

    fn update_schedule(&self, id: &ScheduleId, stops: &[Stop]) -> StoreResult<()> {
        match self.tables.write().schedules.get_mut(id) {
            Some(existing) => {
                *existing = stops.to_vec();
                Ok(())
            }
            None => Err(StoreError::UnknownSchedule(id.clone())),
        }
    }

    fn edit_schedule(
        &self,
        id: &ScheduleId,
        edit: &mut dyn FnMut(&mut Vec<Stop>) -> bool,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        let Some(existing) = tables.schedules.get_mut(id) else {
            return Err(StoreError::UnknownSchedule(id.clone()));
        };
        let mut stops = existing.clone();
        if !edit(&mut stops) {
            return Ok(false);
        }
        *existing = stops;
        if tables.routes.remove(id).is_some() {
            debug!(schedule = %id, "cached route invalidated");
        }
        Ok(true)
    }

    fn schedules(&self) -> StoreResult<Vec<(ScheduleId, Vec<Stop>)>> {
        Ok(sorted_by_key(&self.tables.read().schedules))
    }
}
