//! `fleet-store`: where stops, locations, planned routes, and schedules live.
//!
//! The dispatch core never talks to a database directly; it goes through the
//! [`LocationStore`] trait.  Two implementations ship here:
//!
//! | Type            | Backing                      | Feature  |
//! |-----------------|------------------------------|----------|
//! | [`MemoryStore`] | `HashMap`s behind an `RwLock` | –        |
//! | `SqliteStore`   | a single SQLite file          | `sqlite` |
//!
//! Lookups are two-level: a stop name maps to a location id, and a location
//! id maps to a point.  Both mappings are write-once.
//!
//! [`load_locations_csv`] seeds a store from a CSV file and
//! [`modify_schedule`] applies add/remove edits to a stored schedule.

pub mod error;
pub mod loader;
pub mod memory;
pub mod schedule;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use loader::{load_locations_csv, load_locations_reader};
pub use memory::MemoryStore;
pub use schedule::{ScheduleEdit, modify_schedule};
pub use store::LocationStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
