//! Per-tick velocity

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{Point, approx_eq};

/// Change in position per tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Build a velocity from a heading in degrees and a speed
    ///
    /// 0° points up and angles grow clockwise, so 90° points right.
    pub fn from_angle_and_speed(angle_deg: f64, speed: f64) -> Self {
        let theta = angle_deg.to_radians();
        Self::new(speed * theta.sin(), -speed * theta.cos())
    }

    /// Magnitude of the velocity
    #[inline]
    pub fn speed(&self) -> f64 {
        self.as_vec().length()
    }

    /// The point reached from `p` after one tick
    #[inline]
    pub fn apply_to_point(&self, p: Point) -> Point {
        Point::from(p.as_vec() + self.as_vec())
    }

    /// Both components are zero (within tolerance)
    #[inline]
    pub fn is_zero(&self) -> bool {
        approx_eq(self.dx, 0.0) && approx_eq(self.dy, 0.0)
    }

    #[inline]
    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.dx, self.dy)
    }
}

impl PartialEq for Velocity {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.dx, other.dx) && approx_eq(self.dy, other.dy)
    }
}
