//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  Exactly one component
//! (the world clock in `fleet-clock`) advances it; everyone else only reads
//! it.  The wall-clock length of a tick is `FleetConfig::tick_period_ms`
//! (reference: 50 ms, i.e. 20 steps per second), but nothing in the core
//! depends on the mapping: a tick is simply "one completed world step".

use std::fmt;

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at 20 ticks per second it lasts ~29 billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
