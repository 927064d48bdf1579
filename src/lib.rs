//! Brickfall - a rectangle-and-ball Breakout game
//!
//! Core modules:
//! - `geom`: Points, velocities, segments and rectangles with tolerant comparisons
//! - `sim`: Deterministic simulation (surfaces, collisions, balls, game loop)
//! - `levels`: Built-in, JSON and generated level descriptions
//! - `render`: Drawing sink and an ASCII raster surface
//! - `settings`: Playfield configuration

pub mod error;
pub mod geom;
pub mod levels;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{BrickfallError, Result};
pub use levels::LevelInfo;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f64 = 800.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;
    pub const BORDER_THICKNESS: f64 = 30.0;

    /// Nominal frames per second
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 5.0;

    /// Paddle travel per tick
    pub const PADDLE_SPEED: f64 = 7.0;

    /// Points for each block hit
    pub const HIT_POINTS: u64 = 5;
}
