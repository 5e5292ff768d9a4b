//! Game state and core simulation types
//!
//! Everything the game loop mutates between ticks lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::playfield_center;

/// Which side of the playfield a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A direction sign, always exactly -1 or +1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn flipped(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            Sign::Negative => -1.0,
            Sign::Positive => 1.0,
        }
    }
}

/// Outcome of advancing a ball for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Crossing {
    /// Still in play, or already past a boundary and waiting for reset
    #[default]
    None,
    /// Left the playfield through the left wall
    LeftExit,
    /// Left the playfield through the right wall
    RightExit,
}

impl Crossing {
    /// The side that wins the point for this crossing
    pub fn scorer(self) -> Option<Side> {
        match self {
            Crossing::None => None,
            Crossing::LeftExit => Some(Side::Right),
            Crossing::RightExit => Some(Side::Left),
        }
    }
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed for the whole session)
    pub x: f32,
    /// Top edge, kept within [0, HEIGHT - height]
    y: f32,
    pub width: f32,
    pub height: f32,
    /// Distance travelled per tick at full deflection
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32) -> Self {
        let mut paddle = Self {
            side,
            x,
            y: 0.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        };
        paddle.set_position_clamped(y);
        paddle
    }

    /// Paddle at its starting spot for the given side
    pub fn for_side(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self::new(side, x, 0.0)
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Lowest allowed top edge
    #[inline]
    pub fn max_y(&self) -> f32 {
        (HEIGHT - self.height).max(0.0)
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn set_position_clamped(&mut self, value: f32) {
        self.y = value.clamp(0.0, self.max_y());
    }

    /// Move by `speed * direction`, `direction` being a factor in [-1, 1]
    pub fn update(&mut self, direction: f32) {
        self.set_position_clamped(self.y + self.speed * direction);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub x_dir: Sign,
    pub y_dir: Sign,
    /// Set once the ball has left through a side wall, cleared on reset
    pub crossed_boundary: bool,
}

impl Ball {
    /// A ball at the centre heading right and up
    pub fn new(id: u32, speed: f32) -> Self {
        Self {
            id,
            pos: playfield_center(),
            radius: BALL_RADIUS,
            speed,
            x_dir: Sign::Positive,
            y_dir: Sign::Negative,
            crossed_boundary: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.x_dir.as_f32(), self.y_dir.as_f32()) * self.speed
    }

    /// Advance one tick.
    ///
    /// Bounces off the top and bottom walls without clamping, so the ball may
    /// sit slightly outside the playfield for a frame. Reports a side exit
    /// only on the first tick past the wall.
    pub fn update(&mut self) -> Crossing {
        self.pos += self.velocity();

        if self.pos.y <= 0.0 || self.pos.y >= HEIGHT {
            self.y_dir = self.y_dir.flipped();
        }

        if self.crossed_boundary {
            return Crossing::None;
        }
        if self.pos.x <= 0.0 {
            self.crossed_boundary = true;
            Crossing::LeftExit
        } else if self.pos.x >= WIDTH {
            self.crossed_boundary = true;
            Crossing::RightExit
        } else {
            Crossing::None
        }
    }

    /// Paddle contact: reverse horizontal travel
    pub fn hit(&mut self) {
        self.x_dir = self.x_dir.flipped();
    }

    /// Serve again from the centre towards the other side
    pub fn reset(&mut self) {
        self.pos = playfield_center();
        self.x_dir = self.x_dir.flipped();
        self.crossed_boundary = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Complete game state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub left: Paddle,
    pub right: Paddle,
    /// Live balls (sorted by id)
    pub balls: Vec<Ball>,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Fresh game with one ball, or two when `two_balls` is set
    pub fn new(two_balls: bool) -> Self {
        let mut state = Self::empty();
        state.spawn_ball(BALL_SPEED);
        if two_balls {
            state.spawn_ball(SECOND_BALL_SPEED);
        }
        state
    }

    /// Paddles in place, no balls
    pub fn empty() -> Self {
        Self {
            left: Paddle::for_side(Side::Left),
            right: Paddle::for_side(Side::Right),
            balls: Vec::new(),
            score: Score::default(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    pub fn spawn_ball(&mut self, speed: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.balls.push(Ball::new(id, speed));
        id
    }

    pub fn paddles(&self) -> [&Paddle; 2] {
        [&self.left, &self.right]
    }
}
