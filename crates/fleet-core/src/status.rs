//! Vehicle lifecycle status shared by the registry, the navigation
//! coordinator, and the caller-facing facade.
//!
//! ```text
//!   Spawned ──dispatch──▶ InTransit ──arrive──▶ Delivered
//!                            │  ▲                   │
//!                   destroy/ │  └────re-dispatch────┤
//!                   timeout  ▼                      │
//!                          Failed ◀──────────────────┘ (re-dispatch resets
//!                                                      either terminal state)
//! ```

/// Lifecycle status of a live vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// Spawned in the world, never dispatched.
    #[default]
    Spawned,
    /// A navigation task is driving the vehicle.
    InTransit,
    /// Reached the final target of its last dispatch.
    Delivered,
    /// Its last navigation ended without arriving.
    Failed,
}

impl Status {
    /// `true` for `Delivered` and `Failed`.  Only a new dispatch leaves a
    /// terminal state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Delivered | Status::Failed)
    }

    /// Stable lowercase label, used in logs and persisted snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Spawned   => "spawned",
            Status::InTransit => "in_transit",
            Status::Delivered => "delivered",
            Status::Failed    => "failed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
