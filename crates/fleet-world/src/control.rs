//! Values exchanged with the world simulator.

use fleet_core::Point3;

/// One control input for a vehicle actor.
///
/// Same shape as a typical simulator vehicle control: `throttle` and `brake`
/// in `[0, 1]`, `steer` in `[-1, 1]` with positive values turning left
/// (counter-clockwise, increasing yaw).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleControl {
    pub throttle: f32,
    pub steer:    f32,
    pub brake:    f32,
}

impl VehicleControl {
    /// Zero throttle, full brake.
    pub const STOP: VehicleControl = VehicleControl { throttle: 0.0, steer: 0.0, brake: 1.0 };

    /// Forward drive with the given throttle and steering; inputs are
    /// clamped into their valid ranges.
    pub fn drive(throttle: f32, steer: f32) -> Self {
        Self {
            throttle: throttle.clamp(0.0, 1.0),
            steer:    steer.clamp(-1.0, 1.0),
            brake:    0.0,
        }
    }

    /// `true` when this control asks the vehicle to move forward.
    #[inline]
    pub fn is_driving(&self) -> bool {
        self.throttle > 0.0 && self.brake == 0.0
    }
}

/// Pose of an actor: position plus yaw (degrees, 0 = +x, 90 = +y).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub location: Point3,
    pub yaw_deg:  f64,
}

impl Transform {
    pub fn new(location: Point3, yaw_deg: f64) -> Self {
        Self { location, yaw_deg }
    }

    /// Unit vector the actor is facing, in the XY plane.
    #[inline]
    pub fn forward(&self) -> Point3 {
        Point3::from_heading_deg(self.yaw_deg)
    }
}

/// A pose at which new vehicles may be spawned.
pub type SpawnPoint = Transform;
