//! `fleet-nav`: drives vehicles to their targets, one thread per dispatch.
//!
//! [`Navigator::dispatch_route`] claims the vehicle in the registry, starts a
//! task thread named `nav-<vehicle id>`, and returns a [`DispatchHandle`]
//! straight away.  The task samples the vehicle's position once per world
//! tick, steers toward the current target, and brakes on arrival.
//!
//! # How a task ends
//!
//! | Outcome                              | Cause                                  | Status written |
//! |--------------------------------------|----------------------------------------|----------------|
//! | `Delivered`                          | final target reached                   | `Delivered`    |
//! | `Failed(FailReason::VehicleGone)`    | vehicle destroyed or world lost it     | `Failed`*      |
//! | `Failed(FailReason::TimedOut)`       | leg exceeded `max_ticks_per_leg`       | `Failed`       |
//! | `Cancelled`                          | `cancel()` or a newer dispatch         | none           |
//!
//! \* only if the record still exists.
//!
//! Tasks never advance time; they wait on the clock's
//! [`TickSignal`](fleet_clock::TickSignal).

pub mod error;
pub mod navigator;
pub mod observer;
pub mod outcome;
mod task;

#[cfg(test)]
mod tests;

pub use error::{NavError, NavResult};
pub use navigator::Navigator;
pub use observer::{NavObserver, NoopObserver};
pub use outcome::{DispatchHandle, FailReason, NavOutcome};
pub use task::steer_toward;
