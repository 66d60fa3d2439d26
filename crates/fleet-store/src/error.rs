//! Error types for fleet-store.

use fleet_core::ScheduleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A stop name or location id was registered twice.  The first value is
    /// kept.
    #[error("{kind} {key:?} is already registered")]
    AlreadyRegistered { kind: &'static str, key: String },

    #[error("no schedule with id {0:?}")]
    UnknownSchedule(ScheduleId),

    #[error("location parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn stop_taken(stop: &fleet_core::Stop) -> Self {
        Self::AlreadyRegistered { kind: "stop", key: stop.as_str().to_owned() }
    }

    pub(crate) fn location_taken(id: &fleet_core::LocationId) -> Self {
        Self::AlreadyRegistered { kind: "location", key: id.as_str().to_owned() }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
