//! Camera boundary
//!
//! The game never sees pixels. A `FrameSource` hands out frames, a
//! `BlobDetector` reduces a frame to a blob count and total area for one
//! colour range, and `CameraFeed` glues the two together into one pair of
//! readings per tick.

pub mod fps;
pub mod synthetic;

use glam::Vec2;

use crate::calibration::{ColorProfile, ColorRange};

pub use fps::FrameRateCounter;
pub use synthetic::{Patch, PatchDetector, SyntheticCamera, SyntheticFrame};

/// What the detector found for one colour in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlobReading {
    pub count: u32,
    pub area: f32,
}

impl BlobReading {
    pub fn new(count: u32, area: f32) -> Self {
        Self { count, area }
    }
}

/// Readings for both tracked colours
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorReadings {
    pub first: BlobReading,
    pub second: BlobReading,
}

impl ColorReadings {
    pub fn new(first: BlobReading, second: BlobReading) -> Self {
        Self { first, second }
    }

    /// (colour 1, colour 2) blob counts
    pub fn counts(&self) -> Vec2 {
        Vec2::new(self.first.count as f32, self.second.count as f32)
    }

    /// (colour 1, colour 2) total areas
    pub fn areas(&self) -> Vec2 {
        Vec2::new(self.first.area, self.second.area)
    }
}

/// A camera device
pub trait FrameSource {
    type Frame;

    /// Latest frame, or `None` when nothing new is available. Must not block
    /// for longer than a frame interval.
    fn read_frame(&mut self) -> Option<Self::Frame>;

    /// Stop capturing and free the device
    fn release(&mut self) {}
}

/// Colour segmentation for one frame type
pub trait BlobDetector<F> {
    fn detect(&self, frame: &F, range: &ColorRange) -> BlobReading;
}

/// Per-tick measurement supply used by the game loop
pub trait MeasurementFeed {
    /// Most recent readings, possibly stale. `None` until the first frame.
    fn sample(&mut self) -> Option<ColorReadings>;

    /// Frames per second actually delivered so far
    fn frames_per_second(&self) -> Option<f64>;

    /// Release the device; further samples return the last readings
    fn stop(&mut self);
}

/// A frame source and detector bound to a colour profile
pub struct CameraFeed<S, D> {
    source: S,
    detector: D,
    profile: ColorProfile,
    last: Option<ColorReadings>,
    fps: FrameRateCounter,
    stale_frames: u64,
    stopped: bool,
}

impl<S, D> CameraFeed<S, D>
where
    S: FrameSource,
    D: BlobDetector<S::Frame>,
{
    pub fn new(source: S, detector: D, profile: ColorProfile) -> Self {
        let mut fps = FrameRateCounter::new();
        fps.start();
        Self {
            source,
            detector,
            profile,
            last: None,
            fps,
            stale_frames: 0,
            stopped: false,
        }
    }

    /// Ticks that had to reuse an older reading
    pub fn stale_frames(&self) -> u64 {
        self.stale_frames
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, D> MeasurementFeed for CameraFeed<S, D>
where
    S: FrameSource,
    D: BlobDetector<S::Frame>,
{
    fn sample(&mut self) -> Option<ColorReadings> {
        if self.stopped {
            return self.last;
        }
        match self.source.read_frame() {
            Some(frame) => {
                let [first, second] = &self.profile.ranges;
                let readings = ColorReadings::new(
                    self.detector.detect(&frame, first),
                    self.detector.detect(&frame, second),
                );
                self.fps.update();
                self.last = Some(readings);
            }
            None => {
                self.stale_frames += 1;
                log::trace!("no new camera frame, reusing last readings");
            }
        }
        self.last
    }

    fn frames_per_second(&self) -> Option<f64> {
        self.fps.fps()
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.fps.stop();
        self.source.release();
        if self.stale_frames > 0 {
            log::warn!("{} ticks reused a stale camera frame", self.stale_frames);
        }
    }
}
