//! Rolling-average smoothing for noisy camera measurements
//!
//! Keeps the most recent samples (newest first) and reports their
//! element-wise mean. Each sample is a pair of measurements, one per
//! tracked colour.

use std::collections::VecDeque;

use glam::Vec2;

/// Number of samples averaged by default
pub const WINDOW_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct SignalSmoother {
    /// Newest at the front
    window: VecDeque<Vec2>,
    capacity: usize,
}

impl Default for SignalSmoother {
    fn default() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }
}

impl SignalSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// A window holding at most `capacity` samples (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record a sample and return the updated mean
    pub fn push(&mut self, sample: Vec2) -> Vec2 {
        self.window.push_front(sample);
        if self.window.len() > self.capacity {
            self.window.pop_back();
        }
        self.mean_of_window()
    }

    /// Mean of the buffered samples, `None` before the first push
    pub fn smoothed(&self) -> Option<Vec2> {
        if self.window.is_empty() {
            None
        } else {
            Some(self.mean_of_window())
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Buffered samples, newest first
    pub fn samples(&self) -> impl Iterator<Item = &Vec2> {
        self.window.iter()
    }

    fn mean_of_window(&self) -> Vec2 {
        let sum: Vec2 = self.window.iter().copied().sum();
        sum / self.window.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_has_no_mean() {
        let smoother = SignalSmoother::new();
        assert!(smoother.smoothed().is_none());
        assert!(smoother.is_empty());
    }

    #[test]
    fn test_partial_window_mean() {
        let mut smoother = SignalSmoother::new();
        smoother.push(Vec2::new(2.0, 10.0));
        let mean = smoother.push(Vec2::new(4.0, 20.0));
        assert_eq!(mean, Vec2::new(3.0, 15.0));
        assert_eq!(smoother.smoothed(), Some(mean));
    }

    #[test]
    fn test_full_window_mean() {
        let mut smoother = SignalSmoother::new();
        for i in 1..=10 {
            smoother.push(Vec2::splat(i as f32));
        }
        assert_eq!(smoother.len(), smoother.capacity());
        assert_eq!(smoother.smoothed(), Some(Vec2::splat(5.5)));
    }

    #[test]
    fn test_custom_capacity() {
        let mut smoother = SignalSmoother::with_capacity(3);
        for i in 1..=5 {
            smoother.push(Vec2::splat(i as f32));
        }
        assert_eq!(smoother.capacity(), 3);
        assert_eq!(smoother.smoothed(), Some(Vec2::splat(4.0)));
        assert_eq!(SignalSmoother::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_oldest_sample_evicted() {
        let mut smoother = SignalSmoother::new();
        for i in 1..=12 {
            smoother.push(Vec2::splat(i as f32));
        }
        let kept: Vec<f32> = smoother.samples().map(|s| s.x).collect();
        assert_eq!(kept, vec![12.0, 11.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0]);
        assert_eq!(smoother.smoothed(), Some(Vec2::splat(7.5)));
    }

    proptest! {
        #[test]
        fn prop_window_keeps_most_recent(extra in 0usize..40) {
            let mut smoother = SignalSmoother::new();
            let total = WINDOW_CAPACITY + extra;
            for i in 0..total {
                smoother.push(Vec2::new(i as f32, 0.0));
            }
            prop_assert_eq!(smoother.len(), WINDOW_CAPACITY);
            let newest_first: Vec<f32> = smoother.samples().map(|s| s.x).collect();
            let expected: Vec<f32> = (total - WINDOW_CAPACITY..total).rev().map(|i| i as f32).collect();
            prop_assert_eq!(newest_first, expected);
        }
    }
}
