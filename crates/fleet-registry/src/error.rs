use fleet_core::VehicleId;
use fleet_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    #[error("unknown vehicle {0:?}")]
    UnknownVehicle(VehicleId),

    #[error("could not spawn vehicle {id:?}: {source}")]
    SpawnFailed { id: VehicleId, source: WorldError },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
