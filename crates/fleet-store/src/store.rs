//! The `LocationStore` trait.

use fleet_core::{LocationId, Point3, Route, ScheduleId, Stop};

use crate::StoreResult;

/// Persistent lookup of stops, locations, routes, and schedules.
///
/// # Contract
///
/// - `register_stop` and `register_location` are write-once: a second call
///   for the same key fails with `StoreError::AlreadyRegistered` and leaves
///   the stored value untouched.
/// - `save_route` overwrites any route already stored under the id.
/// - Listing methods return entries sorted by key.
/// - Implementations must be `Send + Sync`; the facade shares one store
///   between the caller and navigation threads.
pub trait LocationStore: Send + Sync {
    // ── Stops and locations ───────────────────────────────────────────────

    fn register_location(&self, id: &LocationId, point: Point3) -> StoreResult<()>;

    fn register_stop(&self, stop: &Stop, location: &LocationId) -> StoreResult<()>;

    fn resolve_stop(&self, stop: &Stop) -> StoreResult<Option<LocationId>>;

    fn resolve_location(&self, id: &LocationId) -> StoreResult<Option<Point3>>;

    fn locations(&self) -> StoreResult<Vec<(LocationId, Point3)>>;

    /// Stop name straight to coordinates.  `None` if either hop is missing.
    fn resolve_stop_point(&self, stop: &Stop) -> StoreResult<Option<Point3>> {
        match self.resolve_stop(stop)? {
            Some(location) => self.resolve_location(&location),
            None => Ok(None),
        }
    }

    // ── Routes ────────────────────────────────────────────────────────────

    fn save_route(&self, id: &ScheduleId, route: &Route) -> StoreResult<()>;

    fn load_route(&self, id: &ScheduleId) -> StoreResult<Option<Route>>;

    /// Returns `true` if a route was removed.
    fn delete_route(&self, id: &ScheduleId) -> StoreResult<bool>;

    fn routes(&self) -> StoreResult<Vec<ScheduleId>>;

    // ── Schedules ─────────────────────────────────────────────────────────

    /// Store a new schedule.  An existing id is left as is and `false` is
    /// returned.
    fn create_schedule(&self, id: &ScheduleId, stops: &[Stop]) -> StoreResult<bool>;

    fn schedule(&self, id: &ScheduleId) -> StoreResult<Option<Vec<Stop>>>;

    /// Replace the stops of an existing schedule.
    fn update_schedule(&self, id: &ScheduleId, stops: &[Stop]) -> StoreResult<()>;

    /// Read-modify-write of one schedule under a single lock or transaction,
    /// so concurrent edits never lose each other's changes.
    ///
    /// `edit` returns `true` if it changed the stops; only then is the new
    /// list stored and the route cached under `id` dropped.  Returns what
    /// `edit` returned, or `UnknownSchedule` if `id` does not exist.
    fn edit_schedule(
        &self,
        id: &ScheduleId,
        edit: &mut dyn FnMut(&mut Vec<Stop>) -> bool,
    ) -> StoreResult<bool>;

    fn schedules(&self) -> StoreResult<Vec<(ScheduleId, Vec<Stop>)>>;
}
