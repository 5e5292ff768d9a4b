//! Paddle controllers
//!
//! Every input method reduces to the same thing: a pair of velocity factors
//! per tick. The primary factor drives the right paddle (player 1), the
//! secondary one the left paddle (player 2).

pub mod camera;
pub mod keyboard;
pub mod scripted;
pub mod smoother;

pub use camera::{CameraController, CameraLayout, CameraTargets};
pub use keyboard::KeyboardController;
pub use scripted::ScriptedAi;
pub use smoother::{SignalSmoother, WINDOW_CAPACITY};

use crate::platform::InputEvent;
use crate::settings::{ControlMode, Settings};
use crate::sim::{GameState, TickInput};
use crate::vision::ColorReadings;

/// What a controller may look at when deciding
#[derive(Debug, Clone, Copy)]
pub struct WorldSnapshot<'a> {
    pub state: &'a GameState,
    /// This tick's camera readings, if a camera is attached
    pub readings: Option<ColorReadings>,
}

impl<'a> WorldSnapshot<'a> {
    pub fn new(state: &'a GameState, readings: Option<ColorReadings>) -> Self {
        Self { state, readings }
    }
}

/// One source of paddle commands
#[derive(Debug, Clone)]
pub enum Controller {
    Keyboard(KeyboardController),
    /// Follows the first ball
    ScriptedAi(ScriptedAi),
    /// Follows the most urgent of several balls
    ScriptedAi2Ball(ScriptedAi),
    Camera(CameraController),
}

impl Controller {
    /// Scripted opponent suited to the number of balls
    pub fn scripted(two_balls: bool) -> Self {
        if two_balls {
            Controller::ScriptedAi2Ball(ScriptedAi::default())
        } else {
            Controller::ScriptedAi(ScriptedAi::default())
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        if let Controller::Keyboard(keyboard) = self {
            keyboard.handle_event(event);
        }
    }

    /// (primary, secondary) velocity factors for this tick
    pub fn compute_velocities(&mut self, world: &WorldSnapshot) -> (f32, f32) {
        let state = world.state;
        match self {
            Controller::Keyboard(keyboard) => keyboard.velocities(),
            Controller::ScriptedAi(ai) => match state.balls.first() {
                Some(ball) => (ai.follow(ball, &state.right), ai.follow(ball, &state.left)),
                None => (0.0, 0.0),
            },
            Controller::ScriptedAi2Ball(ai) => (
                ai.follow_most_urgent(&state.balls, &state.right),
                ai.follow_most_urgent(&state.balls, &state.left),
            ),
            Controller::Camera(camera) => camera.velocities(world.readings),
        }
    }

    pub fn uses_camera(&self) -> bool {
        matches!(self, Controller::Camera(_))
    }
}

/// Who drives which paddle for a session
#[derive(Debug, Clone)]
pub struct ControlPlan {
    /// Drives the right paddle, and the left one when there is no opponent
    pub player: Controller,
    /// Takes over the left paddle in single-player games
    pub opponent: Option<Controller>,
}

impl ControlPlan {
    /// One controller for both paddles
    pub fn solo(player: Controller) -> Self {
        Self {
            player,
            opponent: None,
        }
    }

    pub fn against(player: Controller, opponent: Controller) -> Self {
        Self {
            player,
            opponent: Some(opponent),
        }
    }

    /// Controllers for the configured mode
    pub fn from_settings(settings: &Settings) -> Self {
        let player = match settings.control_mode() {
            ControlMode::Observer => return Self::solo(Controller::scripted(settings.two_balls)),
            ControlMode::Camera => {
                let layout = if settings.single_player {
                    CameraLayout::SinglePaddle
                } else {
                    CameraLayout::TwoPaddles
                };
                Controller::Camera(CameraController::new(
                    layout,
                    settings.use_baseline_value,
                    settings.camera_targets,
                ))
            }
            ControlMode::Keyboard => Controller::Keyboard(KeyboardController::new()),
        };

        if settings.single_player {
            Self::against(player, Controller::scripted(settings.two_balls))
        } else {
            Self::solo(player)
        }
    }

    pub fn uses_camera(&self) -> bool {
        self.player.uses_camera() || self.opponent.as_ref().is_some_and(Controller::uses_camera)
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.player.handle_event(event);
        if let Some(opponent) = &mut self.opponent {
            opponent.handle_event(event);
        }
    }

    /// Resolve this tick's paddle command
    pub fn resolve(&mut self, world: &WorldSnapshot) -> TickInput {
        let (right, secondary) = self.player.compute_velocities(world);
        let left = match &mut self.opponent {
            Some(opponent) => opponent.compute_velocities(world).1,
            None => secondary,
        };
        TickInput::new(left, right)
    }
}
