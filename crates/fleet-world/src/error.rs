//! World-simulator error type.

use thiserror::Error;

use fleet_core::ActorHandle;

/// Errors produced by a [`WorldSim`][crate::WorldSim] implementation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorldError {
    /// The handle was never issued or its actor has been destroyed.
    #[error("{0} does not exist in the world")]
    UnknownActor(ActorHandle),

    #[error("spawn failed: {0}")]
    SpawnFailed(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
