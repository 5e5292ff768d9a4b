//! Colour range profile for camera tracking
//!
//! Persisted as `color_ranges.json`: one `{lower_range, upper_range}` entry per
//! tracked colour, bounds given as HSV triples (hue 0-179, sat/val 0-255).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VpongError};

/// Default file name, relative to the working directory
pub const DEFAULT_PROFILE_PATH: &str = "color_ranges.json";

/// Inclusive HSV bounds for one tracked colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    #[serde(rename = "lower_range")]
    pub lower: [u8; 3],
    #[serde(rename = "upper_range")]
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }

    /// Colour in the middle of the range
    pub fn midpoint(&self) -> [u8; 3] {
        let mid = |c: usize| ((self.lower[c] as u16 + self.upper[c] as u16) / 2) as u8;
        [mid(0), mid(1), mid(2)]
    }

    fn validate(&self, index: usize) -> Result<()> {
        if (0..3).any(|c| self.lower[c] > self.upper[c]) {
            return Err(VpongError::InvalidCalibration(format!(
                "colour {}: lower bound {:?} exceeds upper bound {:?}",
                index + 1,
                self.lower,
                self.upper
            )));
        }
        Ok(())
    }
}

/// Calibrated ranges for the two tracked colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorProfile {
    pub ranges: [ColorRange; 2],
}

impl ColorProfile {
    /// Purple as colour 1, green as colour 2
    pub fn default_profile() -> Self {
        Self {
            ranges: [
                ColorRange::new([125, 50, 50], [155, 255, 255]),
                ColorRange::new([40, 50, 50], [80, 255, 255]),
            ],
        }
    }

    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        let entries: Vec<ColorRange> =
            serde_json::from_str(json).map_err(|source| VpongError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_entries(&entries)
    }

    fn from_entries(entries: &[ColorRange]) -> Result<Self> {
        let [first, second, rest @ ..] = entries else {
            return Err(VpongError::InvalidCalibration(format!(
                "expected two colour ranges, found {}",
                entries.len()
            )));
        };
        if !rest.is_empty() {
            log::warn!(
                "Colour profile has {} ranges, only the first two are tracked",
                entries.len()
            );
        }
        first.validate(0)?;
        second.validate(1)?;
        Ok(Self {
            ranges: [*first, *second],
        })
    }

    /// Serialize for writing to `path`, which only names the file in errors
    pub fn to_json(&self, path: &Path) -> Result<String> {
        serde_json::to_string_pretty(&self.ranges).map_err(|source| VpongError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a profile from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                VpongError::MissingCalibration(path.to_path_buf())
            } else {
                VpongError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let profile = Self::from_json(&json, path)?;
        log::info!("Loaded colour thresholds from {}", path.display());
        Ok(profile)
    }

    /// Write the profile to disk, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json(path)?;
        fs::write(path, json).map_err(|source| VpongError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Colour profile saved to {}", path.display());
        Ok(())
    }
}

/// Produces a fresh colour profile on disk (interactive tuning, presets...)
pub trait Calibrator {
    fn calibrate(&mut self, path: &Path) -> Result<()>;
}

/// Writes the built-in purple/green profile
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCalibrator;

impl Calibrator for DefaultCalibrator {
    fn calibrate(&mut self, path: &Path) -> Result<()> {
        log::info!("Writing default colour thresholds (purple, green)");
        ColorProfile::default_profile().save(path)
    }
}

/// Load the profile at `path`, calibrating first when it is missing or an
/// update was requested.
pub fn resolve_profile(
    path: &Path,
    force_update: bool,
    calibrator: &mut dyn Calibrator,
) -> Result<ColorProfile> {
    if force_update || !path.is_file() {
        log::info!("Updating the colour thresholds in {}", path.display());
        calibrator.calibrate(path)?;
    } else {
        log::info!("Using the existing colour profile {}", path.display());
    }
    ColorProfile::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("vpong-{}-{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    /// Calibrator that never produces a file
    struct BrokenCalibrator;

    impl Calibrator for BrokenCalibrator {
        fn calibrate(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_layout() {
        let json = r#"[
            {"lower_range": [120, 40, 40], "upper_range": [160, 255, 255]},
            {"lower_range": [35, 40, 40], "upper_range": [85, 255, 255]}
        ]"#;
        let profile = ColorProfile::from_json(json, Path::new("test.json")).unwrap();
        assert_eq!(profile.ranges[0].lower, [120, 40, 40]);
        assert_eq!(profile.ranges[1].upper, [85, 255, 255]);

        let written = profile.to_json(Path::new("test.json")).unwrap();
        assert!(written.contains("lower_range"));
        assert!(written.contains("upper_range"));
    }

    #[test]
    fn test_single_range_rejected() {
        let json = r#"[{"lower_range": [0, 0, 0], "upper_range": [10, 10, 10]}]"#;
        let err = ColorProfile::from_json(json, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, VpongError::InvalidCalibration(_)));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let json = r#"[
            {"lower_range": [0, 0, 0], "upper_range": [10, 10, 10]},
            {"lower_range": [90, 0, 0], "upper_range": [10, 10, 10]}
        ]"#;
        let err = ColorProfile::from_json(json, Path::new("x.json")).unwrap_err();
        assert!(err.to_string().contains("colour 2"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = ColorProfile::from_json("{not json", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, VpongError::Json { .. }));
    }

    #[test]
    fn test_contains_and_midpoint() {
        let range = ColorRange::new([40, 50, 50], [80, 255, 255]);
        assert!(range.contains([60, 200, 200]));
        assert!(range.contains([40, 50, 50]));
        assert!(!range.contains([39, 200, 200]));
        assert_eq!(range.midpoint(), [60, 152, 152]);
        assert!(range.contains(range.midpoint()));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let path = scratch_path("missing");
        let err = ColorProfile::load(&path).unwrap_err();
        assert!(matches!(err, VpongError::MissingCalibration(_)));
    }

    #[test]
    fn test_resolve_calibrates_missing_profile() {
        let path = scratch_path("resolve");
        let profile = resolve_profile(&path, false, &mut DefaultCalibrator).unwrap();
        assert_eq!(profile, ColorProfile::default_profile());
        assert!(path.is_file());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_keeps_existing_profile() {
        let path = scratch_path("existing");
        let custom = ColorProfile {
            ranges: [
                ColorRange::new([1, 2, 3], [4, 5, 6]),
                ColorRange::new([7, 8, 9], [10, 11, 12]),
            ],
        };
        custom.save(&path).unwrap();

        let profile = resolve_profile(&path, false, &mut BrokenCalibrator).unwrap();
        assert_eq!(profile, custom);

        let forced = resolve_profile(&path, true, &mut DefaultCalibrator).unwrap();
        assert_eq!(forced, ColorProfile::default_profile());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_errors_name_the_target_file() {
        let path = scratch_path("no_such_dir").join("profile.json");
        let err = ColorProfile::default_profile().save(&path).unwrap_err();
        match err {
            VpongError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_calibration_that_writes_nothing_fails() {
        let path = scratch_path("broken");
        let err = resolve_profile(&path, false, &mut BrokenCalibrator).unwrap_err();
        assert!(matches!(err, VpongError::MissingCalibration(_)));
    }
}
