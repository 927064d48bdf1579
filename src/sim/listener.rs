//! Hit notifications
//!
//! A block carries an ordered list of listeners. When a ball strikes it, the
//! game takes a copy of that list and notifies each listener in turn, so a
//! listener may remove the block, the ball, or other listeners mid-dispatch.

use std::rc::Rc;

use super::ball::BallId;
use super::collision::SurfaceId;
use super::state::GameState;
use crate::consts::HIT_POINTS;
use crate::geom::Point;

/// A ball struck a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub surface: SurfaceId,
    pub ball: BallId,
    pub point: Point,
}

/// Reacts to a ball striking a block
pub trait HitListener {
    fn hit_event(&self, state: &mut GameState, event: &HitEvent);
}

impl<F> HitListener for F
where
    F: Fn(&mut GameState, &HitEvent),
{
    fn hit_event(&self, state: &mut GameState, event: &HitEvent) {
        self(state, event)
    }
}

/// Notify every listener in `snapshot`, in order
pub fn notify_all(snapshot: Vec<Rc<dyn HitListener>>, state: &mut GameState, event: &HitEvent) {
    for listener in snapshot {
        listener.hit_event(state, event);
    }
}

/// Unregisters the struck block and counts it as destroyed
#[derive(Debug, Default)]
pub struct BlockRemover;

impl HitListener for BlockRemover {
    fn hit_event(&self, state: &mut GameState, event: &HitEvent) {
        if state.environment.remove(event.surface).is_some() {
            state.remaining_blocks = state.remaining_blocks.saturating_sub(1);
            log::debug!(
                "Block {:?} destroyed, {} remaining",
                event.surface,
                state.remaining_blocks
            );
        }
    }
}

/// Takes the striking ball out of play (attached to the death zone)
#[derive(Debug, Default)]
pub struct BallRemover;

impl HitListener for BallRemover {
    fn hit_event(&self, state: &mut GameState, event: &HitEvent) {
        if state.remove_ball(event.ball).is_some() {
            state.remaining_balls = state.remaining_balls.saturating_sub(1);
            log::debug!(
                "Ball {:?} lost, {} remaining",
                event.ball,
                state.remaining_balls
            );
        }
    }
}

/// Awards points for every hit
#[derive(Debug)]
pub struct ScoreTracker {
    pub points: u64,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self { points: HIT_POINTS }
    }
}

impl HitListener for ScoreTracker {
    fn hit_event(&self, state: &mut GameState, _event: &HitEvent) {
        state.score += self.points;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::geom::{Rectangle, Velocity};
    use crate::levels::LevelInfo;
    use crate::render::Color;
    use crate::settings::Settings;
    use crate::sim::block::Block;

    fn empty_level() -> LevelInfo {
        LevelInfo {
            name: "Listeners".to_string(),
            ball_velocities: vec![Velocity::new(0.0, -3.0)],
            paddle_speed: 7.0,
            paddle_width: 80.0,
            background: Color::BLACK,
            blocks: Vec::new(),
            blocks_to_remove: 0,
        }
    }

    fn state_with_block() -> (GameState, SurfaceId) {
        let mut state = GameState::from_level(&empty_level(), &Settings::default(), 0);
        let block = Block::new(Rectangle::from_coords(380.0, 170.0, 30.0, 30.0), Color::RED);
        let id = state.environment.add(block);
        state.remaining_blocks = 1;
        (state, id)
    }

    fn event(state: &GameState, surface: SurfaceId) -> HitEvent {
        HitEvent {
            surface,
            ball: state.balls[0].id,
            point: Point::new(395.0, 200.0),
        }
    }

    #[test]
    fn test_block_remover_and_score() {
        let (mut state, id) = state_with_block();
        let block = state.environment.get_mut(id).and_then(|s| s.as_block_mut()).expect("block");
        block.add_hit_listener(Rc::new(BlockRemover));
        block.add_hit_listener(Rc::new(ScoreTracker::default()));

        let hit = event(&state, id);
        state.dispatch_hit(&hit);

        assert!(!state.environment.contains(id));
        assert_eq!(state.remaining_blocks, 0);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_ball_remover() {
        let (mut state, id) = state_with_block();
        let hit = event(&state, id);
        BallRemover.hit_event(&mut state, &hit);
        assert!(state.balls.is_empty());
        assert_eq!(state.remaining_balls, 0);

        // A second notification for the same ball is a no-op
        BallRemover.hit_event(&mut state, &hit);
        assert_eq!(state.remaining_balls, 0);
    }

    #[test]
    fn test_snapshot_survives_removal_mid_dispatch() {
        let (mut state, id) = state_with_block();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let log_second = calls.clone();
        let second: Rc<dyn HitListener> = Rc::new(move |_: &mut GameState, _: &HitEvent| {
            log_second.borrow_mut().push("second");
        });

        let log_first = calls.clone();
        let victim = second.clone();
        let first: Rc<dyn HitListener> = Rc::new(move |state: &mut GameState, event: &HitEvent| {
            log_first.borrow_mut().push("first");
            // Detach the next listener, then destroy the block outright
            if let Some(block) = state
                .environment
                .get_mut(event.surface)
                .and_then(|s| s.as_block_mut())
            {
                block.remove_hit_listener(&victim);
            }
            state.environment.remove(event.surface);
        });

        let block = state.environment.get_mut(id).and_then(|s| s.as_block_mut()).expect("block");
        block.add_hit_listener(first);
        block.add_hit_listener(second);

        let hit = event(&state, id);
        state.dispatch_hit(&hit);

        assert_eq!(*calls.borrow(), vec!["first", "second"]);
        assert!(!state.environment.contains(id));
    }

    #[test]
    fn test_dispatch_to_missing_surface_is_ignored() {
        let (mut state, id) = state_with_block();
        state.environment.remove(id);
        let hit = event(&state, id);
        state.dispatch_hit(&hit);
        assert_eq!(state.score, 0);
    }
}
