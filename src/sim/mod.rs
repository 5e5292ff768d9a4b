//! Playfield simulation
//!
//! All gameplay logic lives here. Nothing in this module touches rendering,
//! input devices or the clock:
//! - One tick advances every entity by one fixed step
//! - Iteration order is stable (balls sorted by id)

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{ball_paddle_overlap, resolve_paddle_hits};
pub use rect::Rect;
pub use state::{Ball, Crossing, GameState, Paddle, Score, Side, Sign};
pub use tick::{GameEvent, TickInput, tick};
