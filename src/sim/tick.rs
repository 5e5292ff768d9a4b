//! Single simulation step
//!
//! Order within a tick is fixed: paddles move, paddle hits are resolved,
//! balls advance, then points are awarded and scoring balls are re-served.

use super::collision::resolve_paddle_hits;
use super::state::{Crossing, GameState, Side};
use crate::saturate;

/// Velocity factors for one tick, each in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub left: f32,
    pub right: f32,
}

impl TickInput {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleHit { ball_id: u32 },
    Point { ball_id: u32, scorer: Side },
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    state.time_ticks += 1;

    state.left.update(saturate(input.left));
    state.right.update(saturate(input.right));

    let mut events: Vec<GameEvent> = resolve_paddle_hits(state)
        .into_iter()
        .map(|ball_id| GameEvent::PaddleHit { ball_id })
        .collect();

    let crossings: Vec<Crossing> = state.balls.iter_mut().map(|b| b.update()).collect();

    for (ball, crossing) in state.balls.iter_mut().zip(crossings) {
        if let Some(scorer) = crossing.scorer() {
            state.score.award(scorer);
            log::debug!(
                "ball {} left the field ({:?}), point to {:?}: {} - {}",
                ball.id,
                crossing,
                scorer,
                state.score.left,
                state.score.right
            );
            events.push(GameEvent::Point {
                ball_id: ball.id,
                scorer,
            });
            ball.reset();
        }
    }

    events
}
