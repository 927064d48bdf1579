//! Game state for a single level
//!
//! Owns the collision environment, the balls in play and the level counters.
//! Everything a hit listener may change lives here.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::ball::{Ball, BallId};
use super::block::Block;
use super::collision::{Environment, SurfaceId};
use super::listener::{BallRemover, BlockRemover, HitEvent, HitListener, ScoreTracker, notify_all};
use super::paddle::Paddle;
use crate::geom::{Point, Rectangle, Velocity};
use crate::levels::LevelInfo;
use crate::render::Color;
use crate::settings::Settings;

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Balls are moving
    Playing,
    /// Frozen until unpaused
    Paused,
    /// Every block was removed
    Cleared,
    /// Every ball was lost
    GameOver,
}

/// Points awarded for clearing a level
pub const CLEAR_BONUS: u64 = 100;

/// Paddle fill color
pub const PADDLE_COLOR: Color = Color::rgb(205, 185, 75);

pub struct GameState {
    pub level_name: String,
    pub environment: Environment,
    /// Balls in play, in spawn order
    pub balls: Vec<Ball>,
    pub paddle: SurfaceId,
    /// Bottom border; balls striking it are removed
    pub death_zone: SurfaceId,
    pub background: Color,
    pub settings: Settings,
    pub score: u64,
    pub remaining_blocks: u32,
    pub remaining_balls: u32,
    pub phase: GamePhase,
    pub time_ticks: u64,
    next_ball_id: u32,
}

impl GameState {
    /// Build a level: its blocks, the four borders, the paddle, then the balls
    ///
    /// Registration order matters for distance ties: level blocks win over
    /// borders, borders over the paddle.
    pub fn from_level(level: &LevelInfo, settings: &Settings, starting_score: u64) -> Self {
        let mut environment = Environment::new();

        let block_remover: Rc<dyn HitListener> = Rc::new(BlockRemover);
        let score_tracker: Rc<dyn HitListener> = Rc::new(ScoreTracker::default());
        for layout in &level.blocks {
            let mut block = Block::new(layout.rect, layout.color);
            block.add_hit_listener(block_remover.clone());
            block.add_hit_listener(score_tracker.clone());
            environment.add(block);
        }

        let death_zone = add_borders(&mut environment, settings);

        let paddle_x = (settings.screen_width - level.paddle_width) / 2.0;
        let paddle = Paddle::new(
            Rectangle::from_coords(
                paddle_x,
                settings.paddle_y,
                level.paddle_width,
                settings.paddle_height,
            ),
            PADDLE_COLOR,
        )
        .with_speed(level.paddle_speed)
        .with_bounds(
            settings.paddle_margin,
            settings.screen_width - level.paddle_width - settings.paddle_margin,
        )
        .with_embed_clearance(settings.ball_radius);
        let paddle = environment.add(paddle);

        let mut state = Self {
            level_name: level.name.clone(),
            environment,
            balls: Vec::with_capacity(level.ball_velocities.len()),
            paddle,
            death_zone,
            background: level.background,
            settings: settings.clone(),
            score: starting_score,
            remaining_blocks: level.blocks_to_remove,
            remaining_balls: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            next_ball_id: 1,
        };

        let spawn = Point::new(settings.screen_width / 2.0, settings.ball_spawn_y);
        for velocity in &level.ball_velocities {
            state.spawn_ball(spawn, *velocity);
        }

        log::info!(
            "Level '{}': {} blocks ({} to remove), {} balls",
            state.level_name,
            level.blocks.len(),
            state.remaining_blocks,
            state.remaining_balls
        );
        state
    }

    /// Put a new ball in play
    pub fn spawn_ball(&mut self, center: Point, velocity: Velocity) -> BallId {
        let id = BallId(self.next_ball_id);
        self.next_ball_id += 1;
        let ball = Ball::new(id, center, self.settings.ball_radius, Color::WHITE)
            .with_velocity(velocity);
        self.balls.push(ball);
        self.remaining_balls += 1;
        id
    }

    /// Take a ball out of play; counters are left to the caller
    pub fn remove_ball(&mut self, id: BallId) -> Option<Ball> {
        let index = self.balls.iter().position(|b| b.id == id)?;
        Some(self.balls.remove(index))
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn paddle(&self) -> Option<&Paddle> {
        self.environment.get(self.paddle)?.as_paddle()
    }

    pub fn paddle_mut(&mut self) -> Option<&mut Paddle> {
        self.environment.get_mut(self.paddle)?.as_paddle_mut()
    }

    /// Notify the struck surface's listeners over a snapshot of its list
    pub fn dispatch_hit(&mut self, event: &HitEvent) {
        let Some(surface) = self.environment.get(event.surface) else {
            return;
        };
        let snapshot = surface.hit_listeners();
        notify_all(snapshot, self, event);
    }

    /// Level finished, either way
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Cleared | GamePhase::GameOver)
    }
}

/// Register right, left, top and bottom borders; returns the bottom one
fn add_borders(environment: &mut Environment, settings: &Settings) -> SurfaceId {
    let t = settings.border_thickness;
    let side_height = settings.screen_height + t;
    let walls = [
        Rectangle::from_coords(settings.screen_width - t, 0.0, t, side_height),
        Rectangle::from_coords(0.0, 0.0, t, side_height),
        Rectangle::from_coords(0.0, settings.top_border_y, settings.screen_width, t),
    ];
    for rect in walls {
        environment.add(Block::new(rect, Color::GRAY));
    }

    let mut death_zone = Block::new(
        Rectangle::from_coords(0.0, settings.death_zone_y, settings.screen_width, t),
        Color::GRAY,
    );
    death_zone.add_hit_listener(Rc::new(BallRemover));
    environment.add(death_zone)
}
