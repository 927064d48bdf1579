//! The moving ball
//!
//! Each tick the ball looks along its trajectory. With a clear path it moves
//! to the end of the trajectory. Otherwise it stays where it is and takes
//! the struck surface's new velocity, and the bounce shows up as movement on
//! the following tick. A ball can therefore sit right next to a boundary for
//! one frame; the paddle's embedding correction relies on this.

use serde::{Deserialize, Serialize};

use super::collision::{Collidable, Environment};
use super::listener::HitEvent;
use crate::geom::{Line, Point, Velocity};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    pub center: Point,
    pub radius: f64,
    pub color: Color,
    pub velocity: Velocity,
}

impl Ball {
    pub fn new(id: BallId, center: Point, radius: f64, color: Color) -> Self {
        Self {
            id,
            center,
            radius,
            color,
            velocity: Velocity::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    /// Segment from the current center to where the ball would be after this tick
    pub fn trajectory(&self) -> Line {
        Line::new(self.center, self.velocity.apply_to_point(self.center))
    }

    /// Advance one tick against `environment`
    ///
    /// Returns the hit when the trajectory is blocked. The caller is
    /// responsible for notifying the struck surface's listeners.
    pub fn move_one_step(&mut self, environment: &Environment) -> Option<HitEvent> {
        if self.velocity.is_zero() {
            return None;
        }

        let trajectory = self.trajectory();
        let Some(collision) = environment.closest_collision(&trajectory) else {
            self.center = trajectory.end;
            return None;
        };

        let surface = environment.get(collision.surface)?;
        self.velocity = surface.hit(collision.point, self.velocity);
        Some(HitEvent {
            surface: collision.surface,
            ball: self.id,
            point: collision.point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rectangle;
    use crate::sim::block::Block;
    use crate::sim::paddle::Paddle;
    use proptest::prelude::*;

    fn ball_at(x: f64, y: f64, velocity: Velocity) -> Ball {
        Ball::new(BallId(1), Point::new(x, y), 5.0, Color::WHITE).with_velocity(velocity)
    }

    #[test]
    fn test_free_movement() {
        let env = Environment::new();
        let mut ball = ball_at(10.0, 10.0, Velocity::new(2.0, -1.0));
        assert_eq!(ball.move_one_step(&env), None);
        assert_eq!(ball.center, Point::new(12.0, 9.0));
    }

    #[test]
    fn test_collision_holds_position_then_bounces() {
        let mut env = Environment::new();
        let wall = env.add(Block::new(Rectangle::from_coords(0.0, 0.0, 100.0, 10.0), Color::GRAY));

        // Moving up toward the wall's bottom face at y=10
        let mut ball = ball_at(50.0, 12.0, Velocity::new(0.0, -3.0));
        let hit = ball.move_one_step(&env).expect("hit");
        assert_eq!(hit.surface, wall);
        assert_eq!(hit.ball, BallId(1));
        assert_eq!(hit.point, Point::new(50.0, 10.0));

        // Position unchanged this tick, velocity reflected
        assert_eq!(ball.center, Point::new(50.0, 12.0));
        assert_eq!(ball.velocity, Velocity::new(0.0, 3.0));

        // Next tick it moves away
        assert_eq!(ball.move_one_step(&env), None);
        assert_eq!(ball.center, Point::new(50.0, 15.0));
    }

    #[test]
    fn test_nearest_of_two_walls() {
        let mut env = Environment::new();
        env.add(Block::new(Rectangle::from_coords(0.0, 0.0, 100.0, 10.0), Color::GRAY));
        let paddle = env.add(Paddle::new(Rectangle::from_coords(0.0, 13.0, 100.0, 5.0), Color::YELLOW));

        // Long step that would cross both; paddle's top face is closer
        let mut ball = ball_at(50.0, 11.0, Velocity::new(0.0, 20.0));
        let hit = ball.move_one_step(&env).expect("hit");
        assert_eq!(hit.surface, paddle);
        // Middle region: straight bounce
        assert_eq!(ball.velocity, Velocity::new(0.0, -20.0));
    }

    proptest! {
        #[test]
        fn prop_zero_velocity_never_moves(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            ticks in 1usize..50,
        ) {
            let mut env = Environment::new();
            env.add(Block::new(Rectangle::from_coords(-10.0, -10.0, 20.0, 20.0), Color::GRAY));
            let mut ball = ball_at(x, y, Velocity::ZERO);
            for _ in 0..ticks {
                prop_assert_eq!(ball.move_one_step(&env), None);
            }
            prop_assert_eq!(ball.center, Point::new(x, y));
        }
    }
}
