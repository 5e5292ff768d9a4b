//! In-memory platform backend
//!
//! Used by the native binary (no window integration yet) and by tests.

use std::collections::VecDeque;

use glam::Vec2;

use super::{Color, EventSource, InputEvent, Surface};
use crate::sim::Rect;

/// A recorded drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect(Rect, Color),
    Circle(Vec2, f32, Color),
    Text(String, Vec2, Color),
}

/// Surface that keeps the draw calls of the last presented frame
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    caption: String,
    pending: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    frames_presented: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Text drawn in the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for HeadlessSurface {
    fn set_caption(&mut self, caption: &str) {
        log::info!("{}", caption);
        self.caption = caption.to_string();
    }

    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCall::Clear(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.pending.push(DrawCall::Rect(rect, color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.pending.push(DrawCall::Circle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color) {
        self.pending
            .push(DrawCall::Text(text.to_string(), position, color));
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

/// Event source replaying pre-recorded batches, one batch per poll
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered by a future poll
    pub fn push_batch(&mut self, events: Vec<InputEvent>) {
        self.batches.push_back(events);
    }

    /// Queue `count` polls that deliver nothing
    pub fn push_idle(&mut self, count: usize) {
        for _ in 0..count {
            self.batches.push_back(Vec::new());
        }
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.batches.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Key;

    #[test]
    fn test_present_swaps_frames() {
        let mut surface = HeadlessSurface::new();
        surface.clear(Color::BLACK);
        surface.draw_text("hello", Vec2::ZERO, Color::WHITE);
        assert!(surface.last_frame().is_empty());

        surface.present();
        assert_eq!(surface.texts(), vec!["hello"]);
        assert_eq!(surface.frames_presented(), 1);

        surface.clear(Color::BLACK);
        surface.present();
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn test_scripted_events_replay_in_order() {
        let mut events = ScriptedEvents::new();
        events.push_batch(vec![InputEvent::KeyDown(Key::Up)]);
        events.push_idle(1);
        events.push_batch(vec![InputEvent::Quit]);

        assert_eq!(events.poll_events(), vec![InputEvent::KeyDown(Key::Up)]);
        assert!(events.poll_events().is_empty());
        assert_eq!(events.poll_events(), vec![InputEvent::Quit]);
        assert!(events.poll_events().is_empty());
    }
}
