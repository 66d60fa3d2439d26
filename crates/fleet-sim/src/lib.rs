//! `fleet-sim`: the caller-facing facade of the rust_fleet framework.
//!
//! [`Fleet`] wires a world simulator, a location store, a route planner, the
//! vehicle registry, the world clock, and the navigator together:
//!
//! ```text
//!   caller ──plan_route / plan_schedule──▶ planner ──▶ store
//!      │
//!      └──dispatch_vehicle──▶ registry.create_or_get ──▶ navigator ──▶ nav-<id> thread
//!                                                                  │
//!   world clock thread ──advance──▶ world ◀──apply_control/transform┘
//!          └──────────publish tick──▶ TickSignal ──wakes──▶ nav tasks
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_sim::{DispatchTarget, FleetBuilder};
//! use fleet_store::MemoryStore;
//! use fleet_world::KinematicWorld;
//!
//! let fleet = FleetBuilder::new(Arc::new(world), Arc::new(MemoryStore::new()))
//!     .config(config)
//!     .build()?;
//! fleet.start_clock()?;
//! let handle = fleet.dispatch_vehicle(&"truck-1".into(), DispatchTarget::Schedule("daily".into()))?;
//! handle.join();
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                           |
//! |-----------|--------------------------------------------------|
//! | `sqlite`  | Enables `fleet_store::SqliteStore`.              |
//! | `fx-hash` | FxHash for the vehicle registry map.             |
//! | `serde`   | Serde derives on core and world types.           |

pub mod builder;
pub mod error;
pub mod fleet;


pub use builder::FleetBuilder;
pub use error::{FleetError, FleetResult};
pub use fleet::{DispatchTarget, Fleet};

// Re-export the types callers need so a binary can depend on `fleet-sim`
// alone.
pub use fleet_clock::ClockState;
pub use fleet_nav::{DispatchHandle, FailReason, NavObserver, NavOutcome, NoopObserver};
pub use fleet_planner::{NearestNeighborPlanner, RoutePlanner};
pub use fleet_registry::VehicleTelemetry;
