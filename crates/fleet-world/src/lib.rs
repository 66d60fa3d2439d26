//! `fleet-world`: the world-simulator boundary.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`sim`]       | `WorldSim` trait: spawn, destroy, control, transform, tick|
//! | [`control`]   | `VehicleControl`, `Transform`, `SpawnPoint`               |
//! | [`map`]       | `RoadMap`: R-tree of road waypoints for destination snapping |
//! | [`kinematic`] | `KinematicWorld`: deterministic in-memory reference world |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                            |
//!
//! # Pluggability
//!
//! The dispatch core only talks to the world through [`WorldSim`], so a
//! physics engine, a remote simulator client, or a test double can be
//! swapped in at compile time.  [`KinematicWorld`] is a point-mass model:
//! throttle sets a target speed and steer sets a yaw rate.  It is good enough
//! to exercise the control loop, not a vehicle-dynamics model.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod control;
pub mod error;
pub mod kinematic;
pub mod map;
pub mod sim;


pub use control::{SpawnPoint, Transform, VehicleControl};
pub use error::{WorldError, WorldResult};
pub use kinematic::{KinematicParams, KinematicWorld, KinematicWorldBuilder};
pub use map::RoadMap;
pub use sim::WorldSim;
