//! `fleet-registry`: the one shared, lock-guarded map of live vehicles.
//!
//! Each record ties a caller-supplied [`VehicleId`](fleet_core::VehicleId)
//! to the world's [`ActorHandle`](fleet_core::ActorHandle), the vehicle's
//! [`Status`](fleet_core::Status), and a dispatch generation.  Positions are
//! never cached; they are read from the world on every query.
//!
//! # Generations
//!
//! Every dispatch claim ([`VehicleRegistry::begin_dispatch`]) bumps the
//! record's generation to a registry-wide fresh value.  A navigation task
//! remembers the generation it was started with and writes status through
//! [`VehicleRegistry::set_status_if_current`], so a superseded task cannot
//! clobber its successor's status.  A vehicle destroyed and created again
//! under the same id never reuses a generation.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                  |
//! |-----------|-----------------------------------------|
//! | `fx-hash` | `FxHashMap` instead of `std` `HashMap`. |

pub mod error;
pub mod registry;


pub use error::{RegistryError, RegistryResult};
pub use registry::{VehicleRecord, VehicleRegistry, VehicleTelemetry};
