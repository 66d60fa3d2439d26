//! `fleet-clock`: the single writer of simulation time.
//!
//! [`WorldClock`] owns the only call site of `WorldSim::advance`.  It either
//! runs a background thread that advances the world every `period`, or is
//! stepped by hand with [`WorldClock::step`]; never both at once.
//!
//! After each completed step the new [`Tick`](fleet_core::Tick) is published
//! on a [`TickSignal`].  Navigation tasks block on the signal instead of
//! sleeping, so they wake exactly once per world step.

pub mod clock;
pub mod error;
pub mod signal;


pub use clock::{ClockState, WorldClock};
pub use error::{ClockError, ClockResult};
pub use signal::TickSignal;
