//! VPong entry point
//!
//! Parses the game modes, wires the collaborators and runs the loop. There is
//! no window integration yet: the session renders to a headless surface and
//! camera mode uses the synthetic camera.

use std::process::ExitCode;

use vpong::calibration::{DefaultCalibrator, resolve_profile};
use vpong::platform::{HeadlessSurface, ScriptedEvents};
use vpong::settings::{Command, USAGE};
use vpong::vision::{CameraFeed, PatchDetector, SyntheticCamera};
use vpong::{ControlMode, Session, Settings};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("vpong: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> vpong::Result<()> {
    let settings = match Settings::from_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Run(settings) => settings,
    };
    log::info!("VPong (native) starting...");

    let mut session = Session::new(&settings, HeadlessSurface::new(), ScriptedEvents::new());

    if settings.control_mode() == ControlMode::Camera {
        log::info!("Controlling the paddles with the camera");
        let profile = resolve_profile(
            &settings.color_profile_path,
            settings.update_color_range,
            &mut DefaultCalibrator,
        )?;
        let camera = SyntheticCamera::demo(&profile, settings.camera_seed);
        let feed = CameraFeed::new(camera, PatchDetector::default(), profile);
        session = session.with_camera(Box::new(feed));
    }

    if settings.max_ticks.is_none() {
        log::warn!("Running headless until interrupted; pass --max_ticks N to stop after N ticks");
    }

    let summary = session.run();
    println!(
        "{} ticks at {} per second. Konstanz Gamer {} : {} Collective Power",
        summary.ticks, summary.tick_rate, summary.score.left, summary.score.right
    );
    if let Some(fps) = summary.camera_fps {
        println!("Camera frame rate: {:.1} FPS", fps);
    }
    Ok(())
}
