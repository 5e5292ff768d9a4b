//! Game loop
//!
//! A `Session` owns everything one run needs and advances it one tick at a
//! time: input, controllers, simulation, drawing, pacing.

use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::consts::WIDTH;
use crate::control::{ControlPlan, WorldSnapshot};
use crate::platform::{Color, EventSource, Surface};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, Score};
use crate::vision::MeasurementFeed;

pub const LEFT_LABEL: &str = "Konstanz Gamer : ";
pub const RIGHT_LABEL: &str = "Collective Power : ";

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    /// Terminal
    Stopped,
}

/// Sleeps so consecutive `wait` calls are at least one period apart
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    last: Option<Instant>,
}

impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / ticks_per_second.max(1) as f64),
            last: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick boundary. A late tick does not sleep.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let pause = remaining(last.elapsed(), self.period);
            if pause > Duration::ZERO {
                thread::sleep(pause);
            }
        }
        self.last = Some(Instant::now());
    }
}

fn remaining(elapsed: Duration, period: Duration) -> Duration {
    period.saturating_sub(elapsed)
}

/// What a finished session reports
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub score: Score,
    pub tick_rate: u32,
    /// Frames per second the camera actually delivered
    pub camera_fps: Option<f64>,
}

pub struct Session<S, E> {
    state: GameState,
    surface: S,
    events: E,
    controls: ControlPlan,
    camera: Option<Box<dyn MeasurementFeed>>,
    clock: TickClock,
    tick_rate: u32,
    max_ticks: Option<u64>,
    phase: SessionPhase,
}

impl<S: Surface, E: EventSource> Session<S, E> {
    pub fn new(settings: &Settings, mut surface: S, events: E) -> Self {
        let mode = settings.control_mode();
        log::info!(
            "Starting {} mode ({} player, {} ball{})",
            mode.as_str(),
            if settings.single_player { "single" } else { "two" },
            if settings.two_balls { 2 } else { 1 },
            if settings.two_balls { "s" } else { "" }
        );
        surface.set_caption(mode.caption());

        let tick_rate = settings.effective_tick_rate();
        Self {
            state: GameState::new(settings.two_balls),
            surface,
            events,
            controls: ControlPlan::from_settings(settings),
            camera: None,
            clock: TickClock::new(tick_rate),
            tick_rate,
            max_ticks: settings.max_ticks,
            phase: SessionPhase::Running,
        }
    }

    /// Attach the camera used by camera controllers
    pub fn with_camera(mut self, camera: Box<dyn MeasurementFeed>) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Replace the controllers chosen from the settings
    pub fn with_controls(mut self, controls: ControlPlan) -> Self {
        self.controls = controls;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// One loop iteration without pacing. Does nothing once stopped.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.phase == SessionPhase::Stopped {
            return Vec::new();
        }

        for event in self.events.poll_events() {
            if event.is_quit() {
                log::info!("Quit requested");
                self.stop();
                return Vec::new();
            }
            self.controls.handle_event(&event);
        }

        let readings = if self.controls.uses_camera() {
            self.camera.as_mut().and_then(|camera| camera.sample())
        } else {
            None
        };

        let input = self
            .controls
            .resolve(&WorldSnapshot::new(&self.state, readings));
        let events = sim::tick(&mut self.state, &input);
        self.draw();
        events
    }

    /// Tick at the configured rate until stopped or out of ticks
    pub fn run(&mut self) -> SessionSummary {
        while self.phase == SessionPhase::Running {
            if self
                .max_ticks
                .is_some_and(|limit| self.state.time_ticks >= limit)
            {
                log::info!("Reached the tick limit");
                self.stop();
                break;
            }
            self.tick();
            self.clock.wait();
        }
        self.summary()
    }

    /// Stop the session and release the camera
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Stopped {
            return;
        }
        self.phase = SessionPhase::Stopped;
        if let Some(camera) = &mut self.camera {
            camera.stop();
            match camera.frames_per_second() {
                Some(fps) => log::info!(
                    "The tick rate is {}. However, the camera delivered frames at approx. {:.2} FPS",
                    self.tick_rate,
                    fps
                ),
                None => log::info!("The tick rate is {}. The camera delivered no frames", self.tick_rate),
            }
        }
        log::info!(
            "Final score after {} ticks: {}{} / {}{}",
            self.state.time_ticks,
            LEFT_LABEL,
            self.state.score.left,
            RIGHT_LABEL,
            self.state.score.right
        );
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            ticks: self.state.time_ticks,
            score: self.state.score,
            tick_rate: self.tick_rate,
            camera_fps: self.camera.as_ref().and_then(|c| c.frames_per_second()),
        }
    }

    fn draw(&mut self) {
        let surface = &mut self.surface;
        surface.clear(Color::BLACK);

        for paddle in self.state.paddles() {
            surface.draw_rect(paddle.rect(), Color::GREEN);
        }
        for (i, ball) in self.state.balls.iter().enumerate() {
            let color = if i == 0 { Color::WHITE } else { Color::RED };
            surface.draw_circle(ball.pos, ball.radius, color);
        }

        let score = self.state.score;
        surface.draw_text(
            &format!("{}{}", LEFT_LABEL, score.left),
            Vec2::new(100.0, 20.0),
            Color::WHITE,
        );
        surface.draw_text(
            &format!("{}{}", RIGHT_LABEL, score.right),
            Vec2::new(WIDTH - 100.0, 20.0),
            Color::WHITE,
        );
        surface.present();
    }
}
