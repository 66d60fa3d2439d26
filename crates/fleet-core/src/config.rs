//! Fleet configuration.
//!
//! `FleetConfig` is the top-level, serialisable configuration.  Applications
//! typically load it from a JSON file (see the `depot` demo) and hand it to
//! `fleet_sim::FleetBuilder`.  Sub-systems receive the narrower view they
//! need: the navigation coordinator only ever sees a [`NavConfig`].

use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── SteeringPolicy ────────────────────────────────────────────────────────────

/// How a navigation task chooses the steering input each step.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SteeringPolicy {
    /// Throttle only, steering left at zero.  The vehicle drives along its
    /// spawn heading and arrives only at targets on that line.
    Straight,
    /// Steer proportionally to the yaw error between the vehicle heading and
    /// the direction to the target.
    #[default]
    PursueTarget,
}

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Parameters of the navigation control loop.
#[derive(Clone, Debug, PartialEq)]
pub struct NavConfig {
    /// A vehicle within this distance of its target has arrived (world units).
    pub arrival_threshold: f64,

    /// Forward throttle applied while driving, in `[0, 1]`.
    pub cruise_throttle: f32,

    pub steering: SteeringPolicy,

    /// Yaw error (degrees) that maps to full steering lock under
    /// [`SteeringPolicy::PursueTarget`].
    pub full_lock_yaw_deg: f64,

    /// Give up on a leg after this many observed ticks.  `None` never gives
    /// up: an unreachable target keeps the task running until it is
    /// cancelled or the vehicle is destroyed.
    pub max_ticks_per_leg: Option<u64>,

    /// How long a task blocks waiting for the next tick before re-checking
    /// for cancellation.  Only matters while the clock is stopped.
    pub idle_poll: Duration,
}

impl Default for NavConfig {
    fn default() -> Self {
        FleetConfig::default().nav_config()
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Top-level configuration for a fleet simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Wall-clock period between world ticks.  Default: 50 ms (20 steps/s).
    pub tick_period_ms: u64,

    /// See [`NavConfig::arrival_threshold`].  Default: 1.0.
    pub arrival_threshold: f64,

    /// See [`NavConfig::cruise_throttle`].  Default: 0.5.
    pub cruise_throttle: f32,

    pub steering: SteeringPolicy,

    /// See [`NavConfig::full_lock_yaw_deg`].  Default: 45°.
    pub full_lock_yaw_deg: f64,

    /// See [`NavConfig::max_ticks_per_leg`].  Default: unbounded.
    pub max_ticks_per_leg: Option<u64>,

    /// Seed for the world's spawn-point selection.  The same seed always
    /// spawns vehicles at the same point.
    pub seed: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            tick_period_ms:    50,
            arrival_threshold: 1.0,
            cruise_throttle:   0.5,
            steering:          SteeringPolicy::PursueTarget,
            full_lock_yaw_deg: 45.0,
            max_ticks_per_leg: None,
            seed:              42,
        }
    }
}

impl FleetConfig {
    /// Wall-clock tick period as a `Duration`.
    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// The navigation view of this configuration.
    pub fn nav_config(&self) -> NavConfig {
        NavConfig {
            arrival_threshold: self.arrival_threshold,
            cruise_throttle:   self.cruise_throttle,
            steering:          self.steering,
            full_lock_yaw_deg: self.full_lock_yaw_deg,
            max_ticks_per_leg: self.max_ticks_per_leg,
            // Four missed ticks before re-checking cancellation.
            idle_poll:         self.tick_period() * 4,
        }
    }

    /// Reject values the control loop cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_period_ms == 0 {
            return Err(CoreError::Config("tick_period_ms must be positive".into()));
        }
        if !(self.arrival_threshold > 0.0) {
            return Err(CoreError::Config(format!(
                "arrival_threshold must be positive, got {}",
                self.arrival_threshold
            )));
        }
        if !(self.cruise_throttle > 0.0 && self.cruise_throttle <= 1.0) {
            return Err(CoreError::Config(format!(
                "cruise_throttle must be in (0, 1], got {}",
                self.cruise_throttle
            )));
        }
        if !(self.full_lock_yaw_deg > 0.0) {
            return Err(CoreError::Config("full_lock_yaw_deg must be positive".into()));
        }
        Ok(())
    }
}
