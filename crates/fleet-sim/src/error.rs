use fleet_clock::ClockError;
use fleet_core::CoreError;
use fleet_nav::NavError;
use fleet_planner::PlannerError;
use fleet_registry::RegistryError;
use fleet_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Nav(#[from] NavError),
}

pub type FleetResult<T> = Result<T, FleetError>;
