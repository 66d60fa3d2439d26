use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    /// Manual stepping while the background loop owns the world.
    #[error("clock is running; stop it before stepping by hand")]
    Running,

    #[error("failed to spawn clock thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type ClockResult<T> = Result<T, ClockError>;
