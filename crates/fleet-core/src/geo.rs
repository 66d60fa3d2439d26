//! Three-dimensional world coordinates and vector helpers.
//!
//! `Point3` doubles as a position and as a displacement vector; the world
//! simulator's coordinate frame is a flat Cartesian space in world units
//! (metres in the reference world), with `z` pointing up.  All arithmetic is
//! `f64` so repeated sampling of a slowly converging vehicle does not pick up
//! single-precision jitter near the arrival threshold.

use std::ops::{Add, Sub};

/// A point (or vector) in world space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, other: Point3) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn scale(self, k: f64) -> Point3 {
        Point3::new(self.x * k, self.y * k, self.z * k)
    }

    /// Unit vector in the same direction.
    ///
    /// Returns `None` when the length is numerically zero (below
    /// `f64::EPSILON`), so callers never divide by zero.
    pub fn normalize(self) -> Option<Point3> {
        let len = self.length();
        if len <= f64::EPSILON {
            return None;
        }
        Some(self.scale(1.0 / len))
    }

    /// Yaw of the vector's XY projection in degrees, in `(-180, 180]`.
    ///
    /// Matches the simulator convention: 0° points along +x, 90° along +y.
    #[inline]
    pub fn heading_deg(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Unit vector in the XY plane pointing along `yaw_deg`.
    #[inline]
    pub fn from_heading_deg(yaw_deg: f64) -> Point3 {
        let r = yaw_deg.to_radians();
        Point3::new(r.cos(), r.sin(), 0.0)
    }

    /// Tuple form used by persisted routes.
    #[inline]
    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    #[inline]
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Point3::new(x, y, z)
    }
}

impl Add for Point3 {
    type Output = Point3;
    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    #[inline]
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Signed difference `to - from` between two yaw angles, wrapped into
/// `(-180, 180]` degrees.  Positive means "turn left" (counter-clockwise).
pub fn yaw_error_deg(from: f64, to: f64) -> f64 {
    let mut d = (to - from) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}
