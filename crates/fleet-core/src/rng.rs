//! Deterministic simulation-level RNG.
//!
//! The dispatch core itself is deterministic; randomness only enters through
//! collaborators such as the reference world's spawn-point choice.  Seeding
//! it from `FleetConfig::seed` keeps whole runs reproducible.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Seeded RNG for world-level decisions.
///
/// Used only in single-threaded or explicitly synchronised contexts (the
/// reference world keeps it behind its state lock).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Choose a random element from a slice.  `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
