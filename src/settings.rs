//! Game modes and tunables
//!
//! Built from command-line flags; serializable so a run's setup can be logged
//! or stored next to recordings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calibration::DEFAULT_PROFILE_PATH;
use crate::consts::DEFAULT_TICK_RATE;
use crate::control::CameraTargets;
use crate::error::{Result, VpongError};

/// Which input drives the human side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// Scripted players on both sides
    Observer,
    Camera,
    Keyboard,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Observer => "observer",
            ControlMode::Camera => "camera",
            ControlMode::Keyboard => "keyboard",
        }
    }

    /// Window caption for the mode
    pub fn caption(&self) -> &'static str {
        match self {
            ControlMode::Observer => {
                "Pong game Observer mode: 2 PC players are playing against each others. Close this window or press ESC to end the game"
            }
            ControlMode::Camera => {
                "Pong game with camera: Close this window or press ESC to end the game"
            }
            ControlMode::Keyboard => {
                "Pong game with keyboard: Up and Down are for player 1 (the right striker). Close this window or press ESC to end the game"
            }
        }
    }
}

pub const USAGE: &str = "\
Usage: vpong [OPTIONS]

  -b, --two_balls            play with a second, faster ball
  -s, --single_player        one human (or camera) player against the computer
  -c, --play_with_camera     steer with coloured cards in front of the camera
  -o, --observer_mode        watch two computer players (overrides -c)
  -u, --update_color_range   recalibrate the tracked colours before starting
  -v, --use_baseline_value   measure camera input relative to the first frame
  -f, --pygame_fps N         ticks per second (alias --tick_rate, default 120)
      --max_ticks N          stop after N ticks
      --profile PATH         colour profile file (default color_ranges.json)
      --seed N               seed for the synthetic camera
  -h, --help                 print this help";

/// Game settings for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Modes ===
    pub two_balls: bool,
    pub single_player: bool,
    pub play_with_camera: bool,
    pub observer_mode: bool,

    // === Camera ===
    /// Recalibrate colours before starting
    pub update_color_range: bool,
    /// Camera control relative to the first frame
    pub use_baseline_value: bool,
    pub color_profile_path: PathBuf,
    /// Targets for two-paddle camera control without a baseline
    pub camera_targets: CameraTargets,
    pub camera_seed: u64,

    // === Loop ===
    /// Ticks per second, `None` for the default
    pub tick_rate: Option<u32>,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            two_balls: false,
            single_player: false,
            play_with_camera: false,
            observer_mode: false,

            update_color_range: false,
            use_baseline_value: false,
            color_profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            camera_targets: CameraTargets::default(),
            camera_seed: 0,

            tick_rate: None,
            max_ticks: None,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Settings),
    Help,
}

impl Settings {
    /// Observer beats camera beats keyboard
    pub fn control_mode(&self) -> ControlMode {
        if self.observer_mode {
            ControlMode::Observer
        } else if self.play_with_camera {
            ControlMode::Camera
        } else {
            ControlMode::Keyboard
        }
    }

    pub fn effective_tick_rate(&self) -> u32 {
        self.tick_rate.unwrap_or(DEFAULT_TICK_RATE)
    }

    /// Parse command-line arguments (without the program name)
    pub fn from_args<I, S>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut settings = Settings::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            for (flag, inline) in split_flags(arg.as_ref()) {
                let flag = flag.as_str();
                let mut value = |name: &str| -> Result<String> {
                    match inline.clone() {
                        Some(v) => Ok(v),
                        None => args.next().map(|v| v.as_ref().to_string()).ok_or_else(|| {
                            VpongError::InvalidArgument(format!("{} needs a value", name))
                        }),
                    }
                };

                match flag {
                    "-b" | "--two_balls" => settings.two_balls = true,
                    "-s" | "--single_player" => settings.single_player = true,
                    "-c" | "--play_with_camera" => settings.play_with_camera = true,
                    "-o" | "--observer_mode" => settings.observer_mode = true,
                    "-u" | "--update_color_range" => settings.update_color_range = true,
                    "-v" | "--use_baseline_value" => settings.use_baseline_value = true,
                    "-f" | "--pygame_fps" | "--tick_rate" => {
                        let rate: u32 = parse_number(flag, &value(flag)?)?;
                        if rate == 0 {
                            return Err(VpongError::InvalidArgument(format!(
                                "{} must be positive",
                                flag
                            )));
                        }
                        settings.tick_rate = Some(rate);
                    }
                    "--max_ticks" => settings.max_ticks = Some(parse_number(flag, &value(flag)?)?),
                    "--seed" => settings.camera_seed = parse_number(flag, &value(flag)?)?,
                    "--profile" => settings.color_profile_path = PathBuf::from(value(flag)?),
                    "-h" | "--help" => return Ok(Command::Help),
                    other => {
                        return Err(VpongError::InvalidArgument(format!(
                            "unrecognised option '{}'",
                            other
                        )));
                    }
                }
            }
        }

        Ok(Command::Run(settings))
    }
}

/// Short flags that take a value
const SHORT_WITH_VALUE: &[char] = &['f'];

/// Split one token into flags with optional attached values.
///
/// `--name=value` carries its value after `=`. Short flags can be grouped
/// (`-sc`), and a value-taking short flag ends the group, taking the rest of
/// the token with or without a leading `=` (`-f60`, `-f=60`).
fn split_flags(arg: &str) -> Vec<(String, Option<String>)> {
    if arg.starts_with("--") {
        return match arg.split_once('=') {
            Some((flag, value)) => vec![(flag.to_string(), Some(value.to_string()))],
            None => vec![(arg.to_string(), None)],
        };
    }

    let Some(group) = arg.strip_prefix('-').filter(|g| !g.is_empty()) else {
        return vec![(arg.to_string(), None)];
    };

    let mut flags = Vec::new();
    for (i, c) in group.char_indices() {
        let flag = format!("-{}", c);
        if SHORT_WITH_VALUE.contains(&c) {
            let rest = &group[i + c.len_utf8()..];
            let rest = rest.strip_prefix('=').unwrap_or(rest);
            flags.push((flag, (!rest.is_empty()).then(|| rest.to_string())));
            break;
        }
        flags.push((flag, None));
    }
    flags
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| {
        VpongError::InvalidArgument(format!("{} expects a whole number, got '{}'", flag, raw))
    })
}
