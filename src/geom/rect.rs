//! Axis-aligned rectangles

use serde::{Deserialize, Serialize};

use super::{Line, Point};

/// Axis-aligned box anchored at its upper-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub upper_left: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(upper_left: Point, width: f64, height: f64) -> Self {
        debug_assert!(
            width >= 0.0 && height >= 0.0,
            "rectangle with negative size: {width}x{height}"
        );
        Self {
            upper_left,
            width,
            height,
        }
    }

    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), width, height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.upper_left.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.upper_left.y
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.upper_left.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.upper_left.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.upper_left.x + self.width / 2.0,
            self.upper_left.y + self.height / 2.0,
        )
    }

    pub fn upper_right(&self) -> Point {
        Point::new(self.max_x(), self.min_y())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.min_x(), self.max_y())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.max_x(), self.max_y())
    }

    pub fn top(&self) -> Line {
        Line::new(self.upper_left, self.upper_right())
    }

    pub fn right(&self) -> Line {
        Line::new(self.upper_right(), self.bottom_right())
    }

    pub fn bottom(&self) -> Line {
        Line::new(self.bottom_left(), self.bottom_right())
    }

    pub fn left(&self) -> Line {
        Line::new(self.upper_left, self.bottom_left())
    }

    /// The four boundary segments in order: top, right, bottom, left
    pub fn edges(&self) -> [Line; 4] {
        [self.top(), self.right(), self.bottom(), self.left()]
    }

    /// Every point where `line` crosses an edge, in edge order
    ///
    /// A corner crossing is reported once per edge it lies on.
    pub fn intersection_points(&self, line: &Line) -> Vec<Point> {
        self.edges()
            .iter()
            .filter_map(|edge| line.intersection_with(edge))
            .collect()
    }

    /// Point lies in the open interior (not on the boundary)
    pub fn contains_strictly(&self, p: Point) -> bool {
        p.x > self.min_x() && p.x < self.max_x() && p.y > self.min_y() && p.y < self.max_y()
    }

    /// Same size, moved so the upper-left corner sits at `x`
    pub fn with_x(&self, x: f64) -> Self {
        Self::new(Point::new(x, self.upper_left.y), self.width, self.height)
    }
}
