//! 2D point with tolerant equality

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::approx_eq;

/// A point in screen space (y grows downward)
///
/// Equality is tolerant: two points are equal when both coordinates are
/// within [`EPSILON`](super::EPSILON) of each other.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    #[inline]
    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.as_vec()
    }
}
