use fleet_core::ScheduleId;
use fleet_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("no schedule with id {0:?}")]
    UnknownSchedule(ScheduleId),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
