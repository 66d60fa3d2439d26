//! `TickSignal`: publish/wait point for completed ticks.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use fleet_core::Tick;

/// Latest completed tick plus a condvar woken on every publish.
#[derive(Default)]
pub struct TickSignal {
    latest:  Mutex<Tick>,
    changed: Condvar,
}

impl TickSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently published tick.
    pub fn current(&self) -> Tick {
        *self.latest.lock()
    }

    pub(crate) fn publish(&self, tick: Tick) {
        *self.latest.lock() = tick;
        self.changed.notify_all();
    }

    /// Block until a tick newer than `seen` is published.
    ///
    /// Returns immediately if one already has been.  `None` if `timeout`
    /// elapses first.
    pub fn wait_past(&self, seen: Tick, timeout: Duration) -> Option<Tick> {
        let deadline = Instant::now() + timeout;
        let mut latest = self.latest.lock();
        while *latest <= seen {
            if self.changed.wait_until(&mut latest, deadline).timed_out() {
                return (*latest > seen).then_some(*latest);
            }
        }
        Some(*latest)
    }
}
