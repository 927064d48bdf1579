//! Directed line segments and segment/segment intersection
//!
//! The intersection test is a chain of special cases that must run in order:
//! degenerate and identical segments first, then vertical segments (before
//! any slope is computed), then parallel segments, and only then the general
//! two-equation solve.

use serde::{Deserialize, Serialize};

use super::{EPSILON, Point, Rectangle, approx_eq, within};

/// How two segments meet
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// No common point
    Disjoint,
    /// Exactly one common point
    At(Point),
    /// Infinitely many common points (identical or overlapping collinear segments)
    Overlap,
}

impl Crossing {
    /// The single intersection point, if there is exactly one
    pub fn point(self) -> Option<Point> {
        match self {
            Crossing::At(p) => Some(p),
            Crossing::Disjoint | Crossing::Overlap => None,
        }
    }

    pub fn is_disjoint(self) -> bool {
        matches!(self, Crossing::Disjoint)
    }
}

/// A directed segment from `start` to `end`
///
/// Equality ignores direction: `(a, b) == (b, a)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    pub fn middle(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Zero-length segment
    #[inline]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Parallel to the y-axis (zero-length segments count as vertical)
    #[inline]
    pub fn is_vertical(&self) -> bool {
        approx_eq(self.start.x, self.end.x)
    }

    /// Whether the two segments share at least one point
    pub fn is_intersecting(&self, other: &Line) -> bool {
        !self.crossing(other).is_disjoint()
    }

    /// The single intersection point, or `None` when the segments are
    /// disjoint, identical, or overlap along a sub-segment
    pub fn intersection_with(&self, other: &Line) -> Option<Point> {
        self.crossing(other).point()
    }

    /// Classify how this segment meets `other`
    pub fn crossing(&self, other: &Line) -> Crossing {
        debug_assert!(
            self.is_finite() && other.is_finite(),
            "segment with non-finite coordinates: {self:?} vs {other:?}"
        );

        if self.is_point() && other.is_point() {
            return if self.start == other.start {
                Crossing::At(self.start)
            } else {
                Crossing::Disjoint
            };
        }
        if self == other {
            return Crossing::Overlap;
        }

        match (self.is_vertical(), other.is_vertical()) {
            (true, true) => {
                if !approx_eq(self.start.x, other.start.x) {
                    return Crossing::Disjoint;
                }
                self.collinear_crossing(other, |p| p.y)
            }
            (true, false) => Self::vertical_crossing(self, other),
            (false, true) => Self::vertical_crossing(other, self),
            (false, false) => {
                if !approx_eq(self.slope(), other.slope()) {
                    return self.general_crossing(other);
                }
                if approx_eq(self.intercept(), other.intercept()) {
                    self.collinear_crossing(other, |p| p.x)
                } else {
                    // Slopes within tolerance can still meet at a far-off shared endpoint
                    self.shared_endpoint(other)
                        .map_or(Crossing::Disjoint, Crossing::At)
                }
            }
        }
    }

    /// Of all points where this segment crosses `rect`, the one closest to `start`
    ///
    /// Distances within EPSILON tie, and ties keep the first point in edge
    /// order (top, right, bottom, left).
    pub fn closest_intersection_to_start(&self, rect: &Rectangle) -> Option<Point> {
        let mut closest: Option<(Point, f64)> = None;
        for p in rect.intersection_points(self) {
            let d = self.start.distance(&p);
            let closer = match closest {
                None => true,
                Some((_, best)) => d < best && !approx_eq(d, best),
            };
            if closer {
                closest = Some((p, d));
            }
        }
        closest.map(|(p, _)| p)
    }

    fn is_finite(&self) -> bool {
        [self.start.x, self.start.y, self.end.x, self.end.y]
            .iter()
            .all(|v| v.is_finite())
    }

    /// An endpoint of `self` equal to an endpoint of `other`
    fn shared_endpoint(&self, other: &Line) -> Option<Point> {
        [self.start, self.end]
            .into_iter()
            .find(|p| *p == other.start || *p == other.end)
    }

    /// Only valid for non-vertical segments
    #[inline]
    fn slope(&self) -> f64 {
        (self.end.y - self.start.y) / (self.end.x - self.start.x)
    }

    /// y-intercept of the supporting line; only valid for non-vertical segments
    #[inline]
    fn intercept(&self) -> f64 {
        self.start.y - self.slope() * self.start.x
    }

    /// Inclusive extent along one axis
    fn span(&self, axis: impl Fn(&Point) -> f64) -> (f64, f64) {
        let (a, b) = (axis(&self.start), axis(&self.end));
        (a.min(b), a.max(b))
    }

    /// Point lies inside this segment's bounding box expanded by EPSILON
    fn bounds_contain(&self, p: Point) -> bool {
        let (x_lo, x_hi) = self.span(|p| p.x);
        let (y_lo, y_hi) = self.span(|p| p.y);
        within(p.x, x_lo, x_hi) && within(p.y, y_lo, y_hi)
    }

    /// Both segments lie on the same supporting line; compare their extents
    /// along `axis`. A single point of contact is returned, a longer overlap is not.
    fn collinear_crossing(&self, other: &Line, axis: impl Fn(&Point) -> f64) -> Crossing {
        let (a_lo, a_hi) = self.span(&axis);
        let (b_lo, b_hi) = other.span(&axis);
        if a_hi < b_lo - EPSILON || b_hi < a_lo - EPSILON {
            return Crossing::Disjoint;
        }
        if self.is_point() {
            return Crossing::At(self.start);
        }
        if other.is_point() {
            return Crossing::At(other.start);
        }

        let lo = a_lo.max(b_lo);
        let hi = a_hi.min(b_hi);
        if hi - lo >= EPSILON {
            return Crossing::Overlap;
        }

        // End-to-end contact
        let touch = self.shared_endpoint(other).unwrap_or_else(|| {
            let mid = (lo + hi) / 2.0;
            if (axis(&self.start) - mid).abs() <= (axis(&self.end) - mid).abs() {
                self.start
            } else {
                self.end
            }
        });
        Crossing::At(touch)
    }

    /// `vertical` has constant x; `other` is not vertical
    fn vertical_crossing(vertical: &Line, other: &Line) -> Crossing {
        if let Some(p) = vertical.shared_endpoint(other) {
            return Crossing::At(p);
        }

        let x = vertical.start.x;
        let found = Point::new(x, other.slope() * x + other.intercept());
        if vertical.bounds_contain(found) && other.bounds_contain(found) {
            Crossing::At(found)
        } else {
            Crossing::Disjoint
        }
    }

    /// Neither segment vertical, slopes differ
    fn general_crossing(&self, other: &Line) -> Crossing {
        if let Some(p) = self.shared_endpoint(other) {
            return Crossing::At(p);
        }

        let (dx1, dy1) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let (dx2, dy2) = (other.end.x - other.start.x, other.end.y - other.start.y);
        let (dx3, dy3) = (other.start.x - self.start.x, other.start.y - self.start.y);

        // Determinant parametrization: both parameters must land in [0, 1]
        let delta = dx1 * dy2 - dy1 * dx2;
        let first = (dx3 * dy2 - dy3 * dx2) / delta;
        let second = (dx3 * dy1 - dy3 * dx1) / delta;
        let on_segment = |t: f64| within(t, 0.0, 1.0);
        if !(on_segment(first) && on_segment(second)) {
            return Crossing::Disjoint;
        }

        let (m1, b1) = (self.slope(), self.intercept());
        let (m2, b2) = (other.slope(), other.intercept());
        let x = (b2 - b1) / (m1 - m2);
        Crossing::At(Point::new(x, m1 * x + b1))
    }
}
