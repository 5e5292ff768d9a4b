//! Scripted computer opponents
//!
//! Paddles follow the ball's height with a dead-zone so they do not jitter
//! once lined up. With several balls in play the paddle picks one target:
//! the nearest ball heading towards it, else the nearest ball overall.

use crate::consts::AI_DEAD_ZONE;
use crate::sim::{Ball, Paddle, Side, Sign};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedAi {
    pub dead_zone: f32,
}

impl Default for ScriptedAi {
    fn default() -> Self {
        Self {
            dead_zone: AI_DEAD_ZONE,
        }
    }
}

impl ScriptedAi {
    pub fn new(dead_zone: f32) -> Self {
        Self { dead_zone }
    }

    /// Direction that brings the paddle's centre towards `target_y`
    pub fn steer(&self, target_y: f32, paddle: &Paddle) -> f32 {
        let offset = target_y - paddle.center_y();
        if offset.abs() <= self.dead_zone {
            0.0
        } else {
            offset.signum()
        }
    }

    /// Follow a single ball
    pub fn follow(&self, ball: &Ball, paddle: &Paddle) -> f32 {
        self.steer(ball.pos.y, paddle)
    }

    /// Follow whichever ball is the most urgent for this paddle
    pub fn follow_most_urgent(&self, balls: &[Ball], paddle: &Paddle) -> f32 {
        match most_urgent(balls, paddle) {
            Some(ball) => self.follow(ball, paddle),
            None => 0.0,
        }
    }
}

/// Whether the ball is travelling towards the paddle's side
fn approaching(ball: &Ball, paddle: &Paddle) -> bool {
    match paddle.side {
        Side::Left => ball.x_dir == Sign::Negative,
        Side::Right => ball.x_dir == Sign::Positive,
    }
}

/// Horizontal gap between the ball and the paddle's playing face
fn gap(ball: &Ball, paddle: &Paddle) -> f32 {
    let face = match paddle.side {
        Side::Left => paddle.x + paddle.width,
        Side::Right => paddle.x,
    };
    (ball.pos.x - face).abs()
}

fn nearest<'a>(candidates: impl Iterator<Item = &'a Ball>, paddle: &Paddle) -> Option<&'a Ball> {
    candidates.min_by(|a, b| gap(a, paddle).total_cmp(&gap(b, paddle)))
}

/// Nearest approaching ball, else nearest ball. Ties go to the lower id.
fn most_urgent<'a>(balls: &'a [Ball], paddle: &Paddle) -> Option<&'a Ball> {
    nearest(balls.iter().filter(|b| approaching(b, paddle)), paddle)
        .or_else(|| nearest(balls.iter(), paddle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball_at(id: u32, x: f32, y: f32, x_dir: Sign) -> Ball {
        let mut ball = Ball::new(id, 3.0);
        ball.pos = Vec2::new(x, y);
        ball.x_dir = x_dir;
        ball
    }

    #[test]
    fn test_moves_towards_ball() {
        let ai = ScriptedAi::default();
        let paddle = Paddle::new(Side::Left, 20.0, 0.0); // centre at 50
        assert_eq!(ai.steer(300.0, &paddle), 1.0);

        let paddle = Paddle::new(Side::Left, 20.0, 400.0); // centre at 450
        assert_eq!(ai.steer(300.0, &paddle), -1.0);
    }

    #[test]
    fn test_dead_zone_holds_still() {
        let ai = ScriptedAi::default();
        let paddle = Paddle::new(Side::Left, 20.0, 250.0); // centre at 300
        assert_eq!(ai.steer(305.0, &paddle), 0.0);
        assert_eq!(ai.steer(290.0, &paddle), 0.0);
        assert_eq!(ai.steer(311.0, &paddle), 1.0);
        assert_eq!(ai.steer(289.0, &paddle), -1.0);
    }

    #[test]
    fn test_prefers_approaching_ball() {
        let ai = ScriptedAi::default();
        let paddle = Paddle::new(Side::Left, 20.0, 250.0);
        // Ball 1 is closer but leaving; ball 2 is coming in from below
        let balls = [
            ball_at(1, 100.0, 50.0, Sign::Positive),
            ball_at(2, 400.0, 550.0, Sign::Negative),
        ];
        assert_eq!(ai.follow_most_urgent(&balls, &paddle), 1.0);
    }

    #[test]
    fn test_nearest_of_approaching_balls() {
        let ai = ScriptedAi::default();
        let paddle = Paddle::new(Side::Right, 870.0, 250.0);
        let balls = [
            ball_at(1, 500.0, 50.0, Sign::Positive),
            ball_at(2, 800.0, 550.0, Sign::Positive),
        ];
        assert_eq!(ai.follow_most_urgent(&balls, &paddle), 1.0);
    }

    #[test]
    fn test_no_ball_approaching_uses_nearest() {
        let ai = ScriptedAi::default();
        let paddle = Paddle::new(Side::Right, 870.0, 250.0);
        let balls = [
            ball_at(1, 200.0, 550.0, Sign::Negative),
            ball_at(2, 600.0, 20.0, Sign::Negative),
        ];
        assert_eq!(ai.follow_most_urgent(&balls, &paddle), -1.0);
    }

    #[test]
    fn test_tie_goes_to_first_ball() {
        let ai = ScriptedAi::default();
        let paddle = Paddle::new(Side::Left, 20.0, 250.0);
        let balls = [
            ball_at(1, 300.0, 20.0, Sign::Negative),
            ball_at(2, 300.0, 580.0, Sign::Negative),
        ];
        assert_eq!(ai.follow_most_urgent(&balls, &paddle), -1.0);
    }

    #[test]
    fn test_no_balls_no_motion() {
        let ai = ScriptedAi::default();
        let paddle = Paddle::for_side(Side::Left);
        assert_eq!(ai.follow_most_urgent(&[], &paddle), 0.0);
    }
}
