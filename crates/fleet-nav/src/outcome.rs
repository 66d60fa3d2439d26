//! Task outcomes and the caller's handle on a running dispatch.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use tracing::error;

use fleet_core::VehicleId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailReason {
    /// The vehicle was destroyed, or the world no longer knows its actor.
    VehicleGone,
    /// A leg ran longer than `NavConfig::max_ticks_per_leg`.
    TimedOut,
    /// The task thread panicked.
    Panicked,
}

/// How a navigation task ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    Delivered,
    Failed(FailReason),
    Cancelled,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailReason::VehicleGone => "vehicle gone",
            FailReason::TimedOut => "timed out",
            FailReason::Panicked => "task panicked",
        })
    }
}

impl fmt::Display for NavOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavOutcome::Delivered => f.write_str("delivered"),
            NavOutcome::Failed(reason) => write!(f, "failed ({reason})"),
            NavOutcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Handle on one dispatch.
///
/// Dropping the handle detaches the task; it keeps driving.
#[derive(Debug)]
pub struct DispatchHandle {
    vehicle:    VehicleId,
    generation: u64,
    cancel:     Arc<AtomicBool>,
    thread:     JoinHandle<NavOutcome>,
}

impl DispatchHandle {
    pub(crate) fn new(
        vehicle: VehicleId,
        generation: u64,
        cancel: Arc<AtomicBool>,
        thread: JoinHandle<NavOutcome>,
    ) -> Self {
        Self { vehicle, generation, cancel, thread }
    }

    pub fn vehicle(&self) -> &VehicleId {
        &self.vehicle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ask the task to stop at its next check.  It ends as `Cancelled`.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the task to end.
    pub fn join(self) -> NavOutcome {
        match self.thread.join() {
            Ok(outcome) => outcome,
            Err(_) => {
                error!(vehicle = %self.vehicle, "navigation task panicked");
                NavOutcome::Failed(FailReason::Panicked)
            }
        }
    }
}
