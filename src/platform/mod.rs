//! Platform abstraction layer
//!
//! The game loop only talks to the outside world through these traits:
//! - `Surface`: drawing primitives and frame presentation
//! - `EventSource`: quit and keyboard events
//!
//! A window backend implements both; `headless` provides in-memory versions.

pub mod headless;

use glam::Vec2;

use crate::sim::Rect;

pub use headless::{DrawCall, HeadlessSurface, ScriptedEvents};

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

impl InputEvent {
    /// Whether this event ends the session
    pub fn is_quit(&self) -> bool {
        matches!(self, InputEvent::Quit | InputEvent::KeyDown(Key::Escape))
    }
}

/// Drawing target for one frame
pub trait Surface {
    fn set_caption(&mut self, caption: &str);
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw `text` centred on `position`
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color);
    fn present(&mut self);
}

/// Source of input events
pub trait EventSource {
    /// Every event received since the previous call, oldest first
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_events() {
        assert!(InputEvent::Quit.is_quit());
        assert!(InputEvent::KeyDown(Key::Escape).is_quit());
        assert!(!InputEvent::KeyUp(Key::Escape).is_quit());
        assert!(!InputEvent::KeyDown(Key::Up).is_quit());
    }
}
