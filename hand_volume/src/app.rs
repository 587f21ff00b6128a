//! Top-level application loop.
//!
//! `App` owns the [`Controller`], the message board, the FPS counter, the
//! landmark source and the audio endpoint.  [`App::tick`] processes one
//! frame; [`run`] drives it from the visualizer's window loop.

use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use hold_menu::{Controller, Effect, FpsCounter, MessageBoard, Overlay};
use tracing::{info, warn};

use crate::audio::{AudioEndpoint, AudioError, DryRunEndpoint, MixerEndpoint};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::source::{Frame, LandmarkSource, SimInput};
use crate::visualizer::{Scene, Visualizer};

/// Shown instead of the level when the mixer rejects a change.
pub const VOLUME_ERROR_MESSAGE: &str = "Volume error";

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App {
    controller:   Controller,
    messages:     MessageBoard,
    fps:          FpsCounter,
    last_fps:     f32,
    source:       Box<dyn LandmarkSource>,
    audio:        Box<dyn AudioEndpoint>,
    failures:     u32,
    max_failures: u32,
}

impl App {
    pub fn new(cfg: &AppConfig, source: Box<dyn LandmarkSource>, audio: Box<dyn AudioEndpoint>) -> Self {
        App {
            controller:   Controller::new(cfg.timing),
            messages:     MessageBoard::new(cfg.timing.message),
            fps:          FpsCounter::default(),
            last_fps:     0.0,
            source,
            audio,
            failures:     0,
            max_failures: cfg.max_frame_failures,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn in_action(&self) -> bool {
        self.controller.in_action()
    }

    /// Acquire and process one frame.
    ///
    /// `Ok(None)` means the frame was bad and skipped.  Fatal source errors,
    /// and too many bad frames in a row, end the loop.
    pub fn tick(&mut self, now: Instant) -> Result<Option<Frame>, AppError> {
        let frame = match self.source.next_frame() {
            Ok(frame) => frame,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                self.failures += 1;
                warn!(error = %e, consecutive = self.failures, "skipping frame");
                if self.failures >= self.max_failures {
                    return Err(AppError::TooManyFrameFailures(self.failures));
                }
                return Ok(None);
            }
        };
        self.failures = 0;
        self.last_fps = self.fps.tick(now);

        for effect in self.controller.step(&frame.hands, now) {
            self.apply(effect, now);
        }
        Ok(Some(frame))
    }

    fn apply(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::Notify(text) => {
                info!(message = %text, "notice");
                self.messages.show(text, now);
            }
            Effect::SetVolume(level) => match self.audio.set_volume_scalar(level.scalar()) {
                Ok(()) => info!(%level, "volume changed"),
                Err(e) => {
                    warn!(error = %e, %level, "volume change failed");
                    self.messages.show(VOLUME_ERROR_MESSAGE, now);
                }
            },
        }
    }

    /// Handle the quit key.  Inside the volume action it only leaves the
    /// action; returns true when the program itself should exit.
    pub fn quit_requested(&mut self) -> bool {
        !self.controller.abort_action()
    }

    /// What to draw for `frame`.
    pub fn scene<'a>(&'a mut self, frame: &'a Frame, now: Instant) -> Scene<'a> {
        let overlay = self.controller.overlay(now).map(Overlay::text);
        let hint = self.controller.hint();
        let fps = self.last_fps;
        Scene {
            image: frame.image.as_ref(),
            hands: &frame.hands,
            fps,
            overlay,
            message: self.messages.active(now),
            hint,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Device setup
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "camera")]
fn open_source(cfg: &AppConfig, _sim_rx: Receiver<SimInput>) -> Result<Box<dyn LandmarkSource>, AppError> {
    use crate::camera::CameraSource;
    let source = CameraSource::open(cfg.camera_index, &cfg.detector_python, &cfg.detector_script)?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "camera"))]
fn open_source(_cfg: &AppConfig, sim_rx: Receiver<SimInput>) -> Result<Box<dyn LandmarkSource>, AppError> {
    Ok(Box::new(crate::source::SimLandmarkSource::new(sim_rx)))
}

/// A missing mixer is fatal unless `--dry-run` was given.
fn open_audio<D>(cfg: &AppConfig, detect: D) -> Result<Box<dyn AudioEndpoint>, AppError>
where
    D: FnOnce() -> Result<MixerEndpoint, AudioError>,
{
    if cfg.dry_run {
        return Ok(Box::new(DryRunEndpoint::new()));
    }
    Ok(Box::new(detect()?))
}

// ════════════════════════════════════════════════════════════════════════════
// run
// ════════════════════════════════════════════════════════════════════════════

pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();

    let source = open_source(&cfg, sim_rx)?;
    let audio = open_audio(&cfg, MixerEndpoint::detect)?;
    let (min, max) = audio.volume_range();
    info!(source = source.name(), audio = %audio.name(), min, max, "devices ready");

    let mut vis = Visualizer::new(sim_tx)?;
    let mut app = App::new(&cfg, source, audio);

    while vis.is_open() {
        if vis.poll_input() && app.quit_requested() {
            info!("quit requested");
            break;
        }

        vis.show_volume_window(app.in_action())?;

        let now = Instant::now();
        let Some(frame) = app.tick(now)? else {
            vis.refresh();
            continue;
        };

        vis.show_volume_window(app.in_action())?;
        vis.render(&app.scene(&frame, now))?;
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
