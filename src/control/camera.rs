//! Camera control from two tracked colours
//!
//! Four policies, chosen by paddle count and baseline use:
//! - single paddle, raw: colour 2 blob count minus colour 1 blob count
//! - single paddle, baseline: change in smoothed colour 2 area minus change in
//!   smoothed colour 1 area, relative to the first frame
//! - two paddles, raw: each colour's area against a fixed target
//! - two paddles, baseline: each colour's smoothed area against its first-frame area
//!
//! Every output is clamped to [-1, 1].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::smoother::SignalSmoother;
use crate::saturate;
use crate::vision::ColorReadings;

/// How many paddles the camera drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraLayout {
    /// Both colours steer one paddle
    SinglePaddle,
    /// Colour 1 steers the primary paddle, colour 2 the secondary
    TwoPaddles,
}

/// Reference areas for the two-paddle policy without a baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTargets {
    pub first: f32,
    pub second: f32,
}

impl Default for CameraTargets {
    fn default() -> Self {
        Self {
            first: 100.0,
            second: 200.0,
        }
    }
}

impl CameraTargets {
    fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.first, self.second)
    }
}

#[derive(Debug, Clone)]
pub struct CameraController {
    layout: CameraLayout,
    use_baseline: bool,
    targets: CameraTargets,
    /// First frame's areas, captured on the first sample
    baseline: Option<Vec2>,
    smoother: SignalSmoother,
}

impl CameraController {
    pub fn new(layout: CameraLayout, use_baseline: bool, targets: CameraTargets) -> Self {
        if layout == CameraLayout::TwoPaddles && !use_baseline {
            log::warn!(
                "Two-paddle camera control without a baseline compares areas against fixed targets ({}, {})",
                targets.first,
                targets.second
            );
        }
        Self {
            layout,
            use_baseline,
            targets,
            baseline: None,
            smoother: SignalSmoother::new(),
        }
    }

    pub fn layout(&self) -> CameraLayout {
        self.layout
    }

    pub fn baseline(&self) -> Option<Vec2> {
        self.baseline
    }

    /// (primary, secondary) velocity factors. Without readings the paddles
    /// hold still. The secondary factor is 0 for the single-paddle layout.
    pub fn velocities(&mut self, readings: Option<ColorReadings>) -> (f32, f32) {
        let Some(readings) = readings else {
            return (0.0, 0.0);
        };

        if !self.use_baseline {
            return match self.layout {
                CameraLayout::SinglePaddle => {
                    let counts = readings.counts();
                    (saturate(counts.y - counts.x), 0.0)
                }
                CameraLayout::TwoPaddles => {
                    let offset = readings.areas() - self.targets.as_vec2();
                    (saturate(offset.x), saturate(offset.y))
                }
            };
        }

        let areas = readings.areas();
        let baseline = *self.baseline.get_or_insert(areas);
        let change = self.smoother.push(areas) - baseline;
        match self.layout {
            CameraLayout::SinglePaddle => (saturate(change.y - change.x), 0.0),
            CameraLayout::TwoPaddles => (saturate(change.x), saturate(change.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::BlobReading;

    fn readings(c1: (u32, f32), c2: (u32, f32)) -> Option<ColorReadings> {
        Some(ColorReadings::new(
            BlobReading::new(c1.0, c1.1),
            BlobReading::new(c2.0, c2.1),
        ))
    }

    #[test]
    fn test_no_readings_no_motion() {
        let mut cam = CameraController::new(CameraLayout::TwoPaddles, true, CameraTargets::default());
        assert_eq!(cam.velocities(None), (0.0, 0.0));
        assert!(cam.baseline().is_none());
    }

    #[test]
    fn test_single_raw_compares_counts() {
        let mut cam =
            CameraController::new(CameraLayout::SinglePaddle, false, CameraTargets::default());
        assert_eq!(cam.velocities(readings((1, 900.0), (3, 10.0))), (1.0, 0.0));
        assert_eq!(cam.velocities(readings((2, 0.0), (1, 0.0))), (-1.0, 0.0));
        assert_eq!(cam.velocities(readings((2, 50.0), (2, 80.0))), (0.0, 0.0));
    }

    #[test]
    fn test_single_baseline_compares_smoothed_changes() {
        let mut cam =
            CameraController::new(CameraLayout::SinglePaddle, true, CameraTargets::default());
        // First frame becomes the baseline
        assert_eq!(cam.velocities(readings((1, 100.0), (1, 100.0))), (0.0, 0.0));
        assert_eq!(cam.baseline(), Some(Vec2::new(100.0, 100.0)));

        // Colour 2 grows: mean area of colour 2 is 100.5, colour 1 stays 100
        let (v, _) = cam.velocities(readings((1, 100.0), (1, 101.0)));
        assert_eq!(v, 0.5);

        // Colour 1 grows a lot: saturates downward (towards -1)
        let (v, _) = cam.velocities(readings((1, 400.0), (1, 100.0)));
        assert_eq!(v, -1.0);
    }

    #[test]
    fn test_baseline_is_captured_once() {
        let mut cam = CameraController::new(CameraLayout::TwoPaddles, true, CameraTargets::default());
        cam.velocities(readings((1, 150.0), (1, 120.0)));
        cam.velocities(readings((1, 10.0), (1, 10.0)));
        assert_eq!(cam.baseline(), Some(Vec2::new(150.0, 120.0)));
    }

    #[test]
    fn test_two_paddles_raw_against_targets() {
        let mut cam =
            CameraController::new(CameraLayout::TwoPaddles, false, CameraTargets::default());
        assert_eq!(cam.velocities(readings((0, 150.0), (0, 150.0))), (1.0, -1.0));
        assert_eq!(cam.velocities(readings((0, 100.0), (0, 200.0))), (0.0, 0.0));
        assert_eq!(cam.velocities(readings((0, 100.5), (0, 199.75))), (0.5, -0.25));
    }

    #[test]
    fn test_two_paddles_baseline_independent() {
        let mut cam = CameraController::new(CameraLayout::TwoPaddles, true, CameraTargets::default());
        cam.velocities(readings((1, 200.0), (1, 200.0)));
        // Means become (250, 150)
        assert_eq!(cam.velocities(readings((1, 300.0), (1, 100.0))), (1.0, -1.0));
    }

    #[test]
    fn test_output_always_saturated() {
        let mut cam =
            CameraController::new(CameraLayout::SinglePaddle, false, CameraTargets::default());
        for diff in 1..20u32 {
            let (v, _) = cam.velocities(readings((0, 0.0), (diff, 0.0)));
            assert_eq!(v, 1.0);
            let (v, _) = cam.velocities(readings((diff, 0.0), (0, 0.0)));
            assert_eq!(v, -1.0);
        }
    }
}
