//! Strongly typed identifier wrappers.
//!
//! Caller-supplied identifiers (`VehicleId`, `ScheduleId`, `LocationId`,
//! `Stop`) are opaque strings: the dispatch core never interprets them, only
//! compares and hashes them.  `ActorHandle` is the world simulator's own
//! integer handle and stays `Copy`.

use std::fmt;

/// Generate a string-backed identifier wrapper.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Caller-supplied vehicle identity, unique among live vehicles.
    pub struct VehicleId;
}

string_id! {
    /// Opaque key of a schedule (an ordered list of stop names) and of the
    /// route planned for it.
    pub struct ScheduleId;
}

string_id! {
    /// Key of a registered point in the world.
    pub struct LocationId;
}

string_id! {
    /// A named place referenced by a schedule.  Resolves to a `LocationId`
    /// through the location store.
    pub struct Stop;
}

/// Opaque reference to an actor inside the world simulator.
///
/// Handles are issued by `WorldSim::spawn` and never reused by the reference
/// world, so a stale handle is always detectable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorHandle(pub u64);

impl fmt::Display for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}
