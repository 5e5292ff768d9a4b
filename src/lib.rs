//! VPong - a teaching Pong with several ways to steer the paddles
//!
//! Core modules:
//! - `sim`: Playfield simulation (paddles, balls, collisions, scoring)
//! - `control`: Keyboard, scripted and camera controllers, signal smoothing
//! - `vision`: Camera collaborator boundary and colour-blob measurements
//! - `calibration`: Colour range profile stored on disk
//! - `platform`: Render surface and input event boundary
//! - `session`: The game loop tying everything together

pub mod calibration;
pub mod control;
pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod vision;

pub use error::{Result, VpongError};
pub use session::{Session, SessionPhase, SessionSummary};
pub use settings::{ControlMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const WIDTH: f32 = 900.0;
    pub const HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Left paddle x offset; the right one sits the same distance (plus its width) from the far wall
    pub const PADDLE_MARGIN: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    pub const BALL_SPEED: f32 = 3.0;
    pub const SECOND_BALL_SPEED: f32 = 5.0;

    /// Scripted paddles ignore offsets smaller than this
    pub const AI_DEAD_ZONE: f32 = 10.0;

    /// Ticks per second when none is configured
    pub const DEFAULT_TICK_RATE: u32 = 120;
}

/// Centre of the playfield (where balls serve from)
#[inline]
pub fn playfield_center() -> Vec2 {
    Vec2::new(
        (consts::WIDTH / 2.0).floor(),
        (consts::HEIGHT / 2.0).floor(),
    )
}

/// Clamp a velocity factor to [-1, 1]
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(-1.0, 1.0)
}
