//! Synthetic camera and patch-based blob detector
//!
//! Stand-in for a webcam plus contour extraction. A frame is a list of
//! coloured patches; the camera cycles through scripted scenes and jitters
//! patch areas with a seeded RNG so runs are reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{BlobDetector, BlobReading, FrameSource};
use crate::calibration::{ColorProfile, ColorRange};

/// Blobs at or below this area are noise
pub const MIN_BLOB_AREA: f32 = 30.0;
/// Blobs at or above this area are background
pub const MAX_BLOB_AREA: f32 = 300.0;

/// A uniformly coloured region of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    pub hsv: [u8; 3],
    pub area: f32,
}

impl Patch {
    pub fn new(hsv: [u8; 3], area: f32) -> Self {
        Self { hsv, area }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticFrame {
    pub patches: Vec<Patch>,
}

/// Counts in-range patches whose area lies strictly between the bounds
#[derive(Debug, Clone, Copy)]
pub struct PatchDetector {
    pub min_area: f32,
    pub max_area: f32,
}

impl Default for PatchDetector {
    fn default() -> Self {
        Self {
            min_area: MIN_BLOB_AREA,
            max_area: MAX_BLOB_AREA,
        }
    }
}

impl BlobDetector<SyntheticFrame> for PatchDetector {
    fn detect(&self, frame: &SyntheticFrame, range: &ColorRange) -> BlobReading {
        frame
            .patches
            .iter()
            .filter(|p| range.contains(p.hsv))
            .filter(|p| p.area > self.min_area && p.area < self.max_area)
            .fold(BlobReading::default(), |acc, p| {
                BlobReading::new(acc.count + 1, acc.area + p.area)
            })
    }
}

/// Scripted camera cycling through scenes
#[derive(Debug, Clone)]
pub struct SyntheticCamera {
    rng: Pcg32,
    scenes: Vec<Vec<Patch>>,
    /// Frames each scene stays in view
    scene_frames: u64,
    /// Maximum area change applied to each patch per frame
    jitter: f32,
    /// Every n-th read returns no frame
    drop_every: Option<u64>,
    reads: u64,
    released: bool,
}

impl SyntheticCamera {
    pub fn new(seed: u64, scenes: Vec<Vec<Patch>>, scene_frames: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            scenes,
            scene_frames: scene_frames.max(1),
            jitter: 0.0,
            drop_every: None,
            reads: 0,
            released: false,
        }
    }

    /// Cards of both profile colours shown in turn: more of colour 2, more of
    /// colour 1, then one of each. A large background blob of colour 1 stays
    /// in view and must be ignored by the detector.
    pub fn demo(profile: &ColorProfile, seed: u64) -> Self {
        let c1 = profile.ranges[0].midpoint();
        let c2 = profile.ranges[1].midpoint();
        let card = 150.0;
        let background = Patch::new(c1, 5_000.0);
        let scenes = vec![
            vec![background, Patch::new(c1, card), Patch::new(c2, card), Patch::new(c2, card)],
            vec![background, Patch::new(c1, card), Patch::new(c1, card), Patch::new(c2, card)],
            vec![background, Patch::new(c1, card), Patch::new(c2, card)],
        ];
        Self::new(seed, scenes, 240)
            .with_jitter(20.0)
            .with_drop_every(7)
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }

    pub fn with_drop_every(mut self, n: u64) -> Self {
        self.drop_every = (n > 0).then_some(n);
        self
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn current_scene(&self) -> &[Patch] {
        if self.scenes.is_empty() {
            return &[];
        }
        let index = (self.reads / self.scene_frames) as usize % self.scenes.len();
        &self.scenes[index]
    }
}

impl FrameSource for SyntheticCamera {
    type Frame = SyntheticFrame;

    fn read_frame(&mut self) -> Option<SyntheticFrame> {
        if self.released {
            return None;
        }
        self.reads += 1;
        if self.drop_every.is_some_and(|n| self.reads % n == 0) {
            return None;
        }

        let jitter = self.jitter;
        let scene = self.current_scene().to_vec();
        let patches = scene
            .into_iter()
            .map(|p| {
                let delta = if jitter > 0.0 {
                    self.rng.random_range(-jitter..=jitter)
                } else {
                    0.0
                };
                Patch::new(p.hsv, (p.area + delta).max(0.0))
            })
            .collect();
        Some(SyntheticFrame { patches })
    }

    fn release(&mut self) {
        self.released = true;
    }
}
