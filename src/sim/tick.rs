//! Fixed-step level loop
//!
//! One call to [`tick`] is one frame: balls step against the environment,
//! hits are dispatched to listeners, then the paddle moves.

use super::ball::BallId;
use super::state::{CLEAR_BONUS, GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move the paddle left (wins over `right`)
    pub left: bool,
    /// Move the paddle right
    pub right: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the paddle follows the balls on its own
    pub idle_mode: bool,
}

/// Advance the level by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Listeners may remove balls, so walk a snapshot of ids
    let ids: Vec<BallId> = state.balls.iter().map(|b| b.id).collect();
    for id in ids {
        let Some(ball) = state.balls.iter_mut().find(|b| b.id == id) else {
            continue;
        };
        if let Some(event) = ball.move_one_step(&state.environment) {
            state.dispatch_hit(&event);
        }
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };
    if let Some(paddle) = state.paddle_mut() {
        if input.left {
            paddle.move_left();
        } else if input.right {
            paddle.move_right();
        }
    }

    // The bonus is paid even when the last ball went down on the same frame,
    // but losing every ball still ends the game
    if state.remaining_blocks == 0 {
        state.score += CLEAR_BONUS;
    }
    if state.remaining_balls == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over on '{}' after {} ticks, score {}",
            state.level_name,
            state.time_ticks,
            state.score
        );
    } else if state.remaining_blocks == 0 {
        state.phase = GamePhase::Cleared;
        log::info!(
            "Level '{}' cleared after {} ticks, score {}",
            state.level_name,
            state.time_ticks,
            state.score
        );
    }
}

/// Run ticks until the level ends or `max_ticks` frames have passed
pub fn run_level<F>(state: &mut GameState, max_ticks: u64, mut input: F) -> GamePhase
where
    F: FnMut(&GameState) -> TickInput,
{
    for _ in 0..max_ticks {
        if state.is_over() {
            break;
        }
        let frame_input = input(state);
        tick(state, &frame_input);
    }
    state.phase
}

/// Steer under the lowest descending ball
fn autopilot(state: &GameState) -> TickInput {
    let Some(paddle) = state.paddle() else {
        return TickInput::default();
    };

    let lowest = |descending: bool| {
        state
            .balls
            .iter()
            .filter(|b| !descending || b.velocity.dy > 0.0)
            .max_by(|a, b| a.center.y.total_cmp(&b.center.y))
    };
    let Some(ball) = lowest(true).or_else(|| lowest(false)) else {
        return TickInput::default();
    };

    // Wander the aim point across the paddle so bounces vary
    let time_factor = state.time_ticks as f64 * 0.05;
    let aim = time_factor.sin() * paddle.rect.width * 0.4;
    let offset = ball.center.x - (paddle.center_x() + aim);
    let deadband = paddle.speed / 2.0;

    TickInput {
        left: offset < -deadband,
        right: offset > deadband,
        ..Default::default()
    }
}
