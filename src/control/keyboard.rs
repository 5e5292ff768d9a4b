//! Keyboard control
//!
//! Edge-triggered: a key press sets its axis, releasing either key of that
//! axis stops it. Up/Down drive the primary paddle, Left/Right the secondary.

use crate::platform::{InputEvent, Key};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardController {
    primary: f32,
    secondary: f32,
}

impl KeyboardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw event. Must be called for every event of the tick.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(Key::Up) => self.primary = -1.0,
            InputEvent::KeyDown(Key::Down) => self.primary = 1.0,
            InputEvent::KeyDown(Key::Left) => self.secondary = -1.0,
            InputEvent::KeyDown(Key::Right) => self.secondary = 1.0,
            InputEvent::KeyUp(Key::Up | Key::Down) => self.primary = 0.0,
            InputEvent::KeyUp(Key::Left | Key::Right) => self.secondary = 0.0,
            _ => {}
        }
    }

    /// (primary, secondary) velocity factors
    pub fn velocities(&self) -> (f32, f32) {
        (self.primary, self.secondary)
    }
}
