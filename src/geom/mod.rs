//! Exact 2D geometry with a single shared tolerance
//!
//! Every equality and boundary comparison in the collision core goes through
//! [`approx_eq`] and [`EPSILON`]. Nothing here compares floats exactly.

pub mod line;
pub mod point;
pub mod rect;
pub mod velocity;

pub use line::{Crossing, Line};
pub use point::Point;
pub use rect::Rectangle;
pub use velocity::Velocity;

/// Tolerance for all geometric comparisons
pub const EPSILON: f64 = 1e-5;

/// True when `a` and `b` differ by less than [`EPSILON`]
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// True when `value` lies in `[min - EPSILON, max + EPSILON]`
#[inline]
pub fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min - EPSILON && value <= max + EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_is_strict() {
        assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
        assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
    }

    #[test]
    fn test_within_expands_both_ends() {
        assert!(within(-EPSILON / 2.0, 0.0, 1.0));
        assert!(within(1.0 + EPSILON / 2.0, 0.0, 1.0));
        assert!(!within(1.1, 0.0, 1.0));
    }
}
