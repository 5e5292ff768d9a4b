//! Frame throughput measurement

use std::time::{Duration, Instant};

/// Counts frames between `start` and `stop`
#[derive(Debug, Clone, Default)]
pub struct FrameRateCounter {
    started: Option<Instant>,
    stopped: Option<Instant>,
    frames: u64,
}

impl FrameRateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.stopped = None;
        self.frames = 0;
    }

    /// Count one frame
    pub fn update(&mut self) {
        self.frames += 1;
    }

    pub fn stop(&mut self) {
        if self.started.is_some() && self.stopped.is_none() {
            self.stopped = Some(Instant::now());
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Time since `start`, frozen once stopped
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started?;
        let end = self.stopped.unwrap_or_else(Instant::now);
        Some(end.saturating_duration_since(started))
    }

    pub fn fps(&self) -> Option<f64> {
        self.elapsed()
            .map(|e| e.as_secs_f64())
            .filter(|secs| *secs > 0.0)
            .map(|secs| self.frames as f64 / secs)
    }
}
