//! The `WorldSim` trait: the dispatch core's only view of the simulator.

use fleet_core::{ActorHandle, Point3};

use crate::{SpawnPoint, Transform, VehicleControl, WorldResult};

/// Narrow interface to an external world simulator.
///
/// All methods take `&self`: a world is shared between the vehicle registry,
/// every navigation task, and the world clock, so implementations provide
/// their own interior synchronisation.
///
/// # Single writer of time
///
/// [`advance`][Self::advance] must only be called by the world clock.  The
/// trait cannot enforce this; `fleet-clock` owns the only call site in the
/// framework.
///
/// # Stale handles
///
/// After [`destroy`][Self::destroy], every call with that handle must return
/// [`WorldError::UnknownActor`][crate::WorldError::UnknownActor] rather than
/// panic or act on a different actor.  Navigation tasks rely on this to
/// detect a vehicle destroyed under them.
pub trait WorldSim: Send + Sync + 'static {
    /// Spawn a new vehicle actor.
    fn spawn(&self) -> WorldResult<ActorHandle>;

    /// Remove an actor from the world.
    fn destroy(&self, handle: ActorHandle) -> WorldResult<()>;

    /// Set the control input the actor will follow from the next tick on.
    fn apply_control(&self, handle: ActorHandle, control: VehicleControl) -> WorldResult<()>;

    /// Current pose of the actor.
    fn transform(&self, handle: ActorHandle) -> WorldResult<Transform>;

    /// Current velocity vector of the actor (world units per second).
    fn velocity(&self, handle: ActorHandle) -> WorldResult<Point3>;

    /// Advance the world by one fixed step.
    fn advance(&self);

    /// Project an arbitrary point onto the drivable map.
    ///
    /// Default: the point itself (an open world with no road network).
    fn snap_to_map(&self, point: Point3) -> Point3 {
        point
    }

    /// Poses at which vehicles may be spawned.
    ///
    /// Default: none advertised.
    fn spawn_points(&self) -> Vec<SpawnPoint> {
        Vec::new()
    }
}
