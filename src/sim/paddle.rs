//! The player's paddle
//!
//! The top face is split into five equal regions. The outer four send the
//! ball off at a fixed angle regardless of how it arrived; the middle region
//! bounces it straight back.

use super::collision::Collidable;
use crate::consts::{BALL_RADIUS, PADDLE_SPEED};
use crate::geom::{EPSILON, Point, Rectangle, Velocity, approx_eq, within};
use crate::render::Color;

/// Number of equal regions across the top face
pub const NUM_REGIONS: usize = 5;

/// Outgoing heading per region, left to right (`None` = straight bounce)
pub const REGION_ANGLES: [Option<f64>; NUM_REGIONS] =
    [Some(300.0), Some(330.0), None, Some(30.0), Some(60.0)];

/// Heading after striking the left face
pub const LEFT_FACE_ANGLE: f64 = 300.0;
/// Heading after striking the right face
pub const RIGHT_FACE_ANGLE: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rectangle,
    pub color: Color,
    /// Horizontal distance per move
    pub speed: f64,
    /// Leftmost allowed upper-left x
    pub min_x: f64,
    /// Rightmost allowed upper-left x
    pub max_x: f64,
    /// How far outside the paddle an embedded impact is pushed
    pub embed_clearance: f64,
}

impl Paddle {
    /// Unbounded paddle with default speed
    pub fn new(rect: Rectangle, color: Color) -> Self {
        Self {
            rect,
            color,
            speed: PADDLE_SPEED,
            min_x: f64::NEG_INFINITY,
            max_x: f64::INFINITY,
            embed_clearance: BALL_RADIUS,
        }
    }

    /// Limit movement so the upper-left x stays in `[min_x, max_x]`
    pub fn with_bounds(mut self, min_x: f64, max_x: f64) -> Self {
        self.min_x = min_x;
        self.max_x = max_x;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_embed_clearance(mut self, clearance: f64) -> Self {
        self.embed_clearance = clearance;
        self
    }

    pub fn center_x(&self) -> f64 {
        self.rect.center().x
    }

    pub fn move_left(&mut self) {
        let x = self.rect.min_x();
        let dx = (-self.speed).max(self.min_x - x);
        self.rect = self.rect.with_x(x + dx);
    }

    pub fn move_right(&mut self) {
        let x = self.rect.min_x();
        let dx = self.speed.min(self.max_x - x);
        self.rect = self.rect.with_x(x + dx);
    }

    /// Zero-based region index for an x on the top face
    ///
    /// A point on a shared region boundary belongs to the left region.
    pub fn region(&self, x: f64) -> Option<usize> {
        let left = self.rect.min_x();
        if !within(x, left, self.rect.max_x()) {
            return None;
        }
        let region_width = self.rect.width / NUM_REGIONS as f64;
        let index = (0..NUM_REGIONS)
            .find(|&i| x < left + (i + 1) as f64 * region_width + EPSILON)
            .unwrap_or(NUM_REGIONS - 1);
        Some(index)
    }
}

impl Collidable for Paddle {
    fn collision_rectangle(&self) -> Rectangle {
        self.rect
    }

    fn hit(&self, collision_point: Point, current_velocity: Velocity) -> Velocity {
        let rect = &self.rect;
        let speed = current_velocity.speed();
        let mut impact = collision_point;

        // The paddle moved over the ball during the last tick
        if rect.contains_strictly(impact) {
            impact.x = if current_velocity.dx > 0.0 {
                rect.max_x() + self.embed_clearance
            } else {
                rect.min_x() - self.embed_clearance
            };
            log::trace!("Ball embedded in paddle, impact moved to x={:.3}", impact.x);
        }

        if approx_eq(impact.y, rect.min_y()) {
            if let Some(region) = self.region(impact.x) {
                return match REGION_ANGLES[region] {
                    Some(angle) => Velocity::from_angle_and_speed(angle, speed),
                    None => Velocity::new(current_velocity.dx, -current_velocity.dy),
                };
            }
        }

        if within(impact.y, rect.min_y(), rect.max_y()) {
            if approx_eq(impact.x, rect.min_x()) {
                return Velocity::from_angle_and_speed(LEFT_FACE_ANGLE, speed);
            }
            if approx_eq(impact.x, rect.max_x()) {
                return Velocity::from_angle_and_speed(RIGHT_FACE_ANGLE, speed);
            }
        }

        Velocity::new(-current_velocity.dx, current_velocity.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 100 wide: regions are 20 units each starting at x=350
    fn paddle() -> Paddle {
        Paddle::new(Rectangle::from_coords(350.0, 565.0, 100.0, 15.0), Color::YELLOW)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_center_bounces_straight() {
        let v = paddle().hit(Point::new(400.0, 565.0), Velocity::new(1.5, 4.0));
        assert_eq!(v, Velocity::new(1.5, -4.0));
    }

    #[test]
    fn test_region_one_sends_ball_at_300_degrees() {
        let incoming = Velocity::new(3.0, 4.0);
        let v = paddle().hit(Point::new(355.0, 565.0), incoming);
        let expected = Velocity::from_angle_and_speed(300.0, 5.0);
        assert_eq!(v, expected);
        assert!(close(v.speed(), incoming.speed()));
        assert!(v.dx < 0.0 && v.dy < 0.0);
    }

    #[test]
    fn test_region_table() {
        let p = paddle();
        let incoming = Velocity::new(0.0, 5.0);
        let at = |x: f64| p.hit(Point::new(x, 565.0), incoming);
        assert_eq!(at(375.0), Velocity::from_angle_and_speed(330.0, 5.0));
        assert_eq!(at(415.0), Velocity::from_angle_and_speed(30.0, 5.0));
        assert_eq!(at(445.0), Velocity::from_angle_and_speed(60.0, 5.0));
        // Right corner still belongs to the last region
        assert_eq!(at(450.0), Velocity::from_angle_and_speed(60.0, 5.0));
    }

    #[test]
    fn test_region_boundaries_belong_to_left_region() {
        let p = paddle();
        assert_eq!(p.region(350.0), Some(0));
        assert_eq!(p.region(370.0), Some(0));
        assert_eq!(p.region(370.1), Some(1));
        assert_eq!(p.region(400.0), Some(2));
        assert_eq!(p.region(450.0), Some(4));
        assert_eq!(p.region(451.0), None);
    }

    #[test]
    fn test_side_faces() {
        let p = paddle();
        let incoming = Velocity::new(4.0, 3.0);
        assert_eq!(
            p.hit(Point::new(350.0, 570.0), incoming),
            Velocity::from_angle_and_speed(LEFT_FACE_ANGLE, 5.0)
        );
        assert_eq!(
            p.hit(Point::new(450.0, 570.0), Velocity::new(-4.0, 3.0)),
            Velocity::from_angle_and_speed(RIGHT_FACE_ANGLE, 5.0)
        );
    }

    #[test]
    fn test_embedded_impact_falls_back_to_horizontal_flip() {
        // Inside the paddle: pushed out past the right face, then no face matches
        let v = paddle().hit(Point::new(400.0, 570.0), Velocity::new(2.0, 3.0));
        assert_eq!(v, Velocity::new(-2.0, 3.0));
    }

    #[test]
    fn test_embedded_impact_lands_on_face_with_zero_clearance() {
        let p = paddle().with_embed_clearance(0.0);
        let v = p.hit(Point::new(400.0, 570.0), Velocity::new(-2.0, 3.0));
        assert_eq!(v, Velocity::from_angle_and_speed(LEFT_FACE_ANGLE, v.speed()));
    }

    #[test]
    fn test_bottom_face_falls_back() {
        let v = paddle().hit(Point::new(400.0, 580.0), Velocity::new(2.0, -3.0));
        assert_eq!(v, Velocity::new(-2.0, -3.0));
    }

    #[test]
    fn test_movement_is_bounded() {
        let mut p = paddle().with_bounds(340.0, 360.0).with_speed(7.0);
        p.move_left();
        assert!(close(p.rect.min_x(), 343.0));
        p.move_left();
        assert!(close(p.rect.min_x(), 340.0));
        p.move_right();
        p.move_right();
        p.move_right();
        p.move_right();
        assert!(close(p.rect.min_x(), 360.0));
        assert!(close(p.rect.min_y(), 565.0));
    }
}
