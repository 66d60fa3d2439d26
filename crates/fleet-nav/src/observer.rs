//! Navigation observer trait for progress reporting.

use fleet_core::{Point3, Status, VehicleId};

use crate::NavOutcome;

/// Callbacks invoked from navigation task threads.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Calls for one dispatch arrive in
/// order; calls for different vehicles may interleave.
///
/// # Example
///
/// ```rust,ignore
/// struct Arrivals;
///
/// impl NavObserver for Arrivals {
///     fn on_waypoint(&self, id: &VehicleId, index: usize, point: Point3) {
///         println!("{id} reached stop {index} at {point}");
///     }
/// }
/// ```
pub trait NavObserver: Send + Sync {
    /// A status was written for `id` by the navigator.
    fn on_status(&self, _id: &VehicleId, _status: Status) {}

    /// `id` arrived at the `index`-th target of its route.
    fn on_waypoint(&self, _id: &VehicleId, _index: usize, _point: Point3) {}

    /// The dispatch task for `id` ended.
    fn on_finished(&self, _id: &VehicleId, _outcome: NavOutcome) {}
}

/// A [`NavObserver`] that does nothing.
pub struct NoopObserver;

impl NavObserver for NoopObserver {}
