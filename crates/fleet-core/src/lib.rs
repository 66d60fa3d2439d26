//! `fleet-core`: foundational types for the `rust_fleet` dispatch framework.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `ScheduleId`, `LocationId`, `Stop`,      |
//! |                 | `ActorHandle`                                         |
//! | [`geo`]         | `Point3`, Euclidean distance, normalisation           |
//! | [`route`]       | `Route`: ordered points to visit                     |
//! | [`time`]        | `Tick`                                                |
//! | [`status`]      | `Status` vehicle lifecycle enum                       |
//! | [`config`]      | `FleetConfig`, `NavConfig`, `SteeringPolicy`          |
//! | [`rng`]         | `SimRng` (seeded world-level RNG)                     |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; needed |
//! |         | to load `FleetConfig` from a JSON file.                    |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod route;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FleetConfig, NavConfig, SteeringPolicy};
pub use error::{CoreError, CoreResult};
pub use geo::Point3;
pub use ids::{ActorHandle, LocationId, ScheduleId, Stop, VehicleId};
pub use rng::SimRng;
pub use route::Route;
pub use status::Status;
pub use time::Tick;
