//! Deterministic simulation module
//!
//! Collision surfaces, the nearest-collision query, ball stepping and the
//! level loop. This module must stay pure and deterministic:
//! - One trajectory step per ball per tick
//! - Stable iteration order (registration order for surfaces, spawn order for balls)
//! - No rendering or platform dependencies

pub mod ball;
pub mod block;
pub mod collision;
pub mod listener;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallId};
pub use block::Block;
pub use collision::{Collidable, CollisionInfo, Environment, Surface, SurfaceId};
pub use listener::{BallRemover, BlockRemover, HitEvent, HitListener, ScoreTracker};
pub use paddle::Paddle;
pub use state::{CLEAR_BONUS, GamePhase, GameState};
pub use tick::{TickInput, run_level, tick};
