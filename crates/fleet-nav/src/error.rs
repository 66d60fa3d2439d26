use fleet_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("unknown vehicle {0:?}")]
    UnknownVehicle(VehicleId),

    #[error("failed to spawn navigation thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type NavResult<T> = Result<T, NavError>;
