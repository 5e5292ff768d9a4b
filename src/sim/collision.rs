//! Ball-paddle collision detection
//!
//! Overlap is tested every tick, not once per contact: a ball that stays
//! inside a paddle for several ticks has its horizontal direction flipped on
//! each of them. This matches the classic behaviour and is kept on purpose.

use super::rect::Rect;
use super::state::{Ball, GameState, Paddle};

/// Whether a ball's bounding square overlaps a paddle
pub fn ball_paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    ball.rect().intersects(&paddle.rect())
}

/// Flip every ball touching a paddle. Returns the ids of balls that were hit,
/// once per paddle touched.
pub fn resolve_paddle_hits(state: &mut GameState) -> Vec<u32> {
    let paddle_rects: [Rect; 2] = [state.left.rect(), state.right.rect()];
    let mut hits = Vec::new();

    for rect in &paddle_rects {
        for ball in &mut state.balls {
            if ball.rect().intersects(rect) {
                ball.hit();
                hits.push(ball.id);
            }
        }
    }

    hits
}
