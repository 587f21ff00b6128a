//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  FPS: 30                                     │
//! │                                              │
//! │  Waiting... 3s                               │
//! │                 (camera frame + skeleton)    │
//! │                                              │
//! │  Option 1 selected                           │
//! │  status bar: instruction for the phase       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The "Main Menu" window is always open.  A second "Volume Control" window
//! shows the same picture while the volume action runs and is closed again
//! when it ends.

use std::sync::mpsc::Sender;
use std::time::Duration;

use hand_pose::{HandLandmarks, ThumbSign, HAND_CONNECTIONS};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::AppError;
use crate::source::{Image, SimInput};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:        usize = 640;
pub const WIN_H:        usize = 480;
pub const MAIN_TITLE:   &str  = "Main Menu";
pub const VOLUME_TITLE: &str  = "Volume Control";

const FPS_POS:       (usize, usize) = (10, 40);
const OVERLAY_POS:   (usize, usize) = (10, 110);
const MESSAGE_POS:   (usize, usize) = (10, 380);
const STATUS_Y:      usize = WIN_H - 24;
const BG_COLOR:      u32   = 0xFF1A1A2E;
const STATUS_BG:     u32   = 0xFF0F3460;
const FPS_COLOR:     u32   = 0xFF3399FF;
const OVERLAY_COLOR: u32   = 0xFFFFFF00;
const MESSAGE_COLOR: u32   = 0xFF00FF00;
const STATUS_COLOR:  u32   = 0xFFDDDDDD;
const BONE_COLOR:    u32   = 0xFFFFFFFF;
const JOINT_COLOR:   u32   = 0xFFFF3030;

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

/// Everything drawn in one frame.
pub struct Scene<'a> {
    pub image:   Option<&'a Image>,
    pub hands:   &'a [HandLandmarks],
    pub fps:     f32,
    pub overlay: Option<String>,
    pub message: Option<&'a str>,
    pub hint:    &'a str,
}

pub fn draw_scene(canvas: &mut Canvas, scene: &Scene) {
    match scene.image {
        Some(image) => canvas.blit_scaled(image),
        None        => canvas.clear(BG_COLOR),
    }

    for hand in scene.hands {
        draw_hand(canvas, hand);
    }

    canvas.draw_text(&format!("FPS: {}", scene.fps as u32), FPS_POS.0, FPS_POS.1, 4, FPS_COLOR);
    if let Some(overlay) = &scene.overlay {
        canvas.draw_text(overlay, OVERLAY_POS.0, OVERLAY_POS.1, 3, OVERLAY_COLOR);
    }
    if let Some(message) = scene.message {
        canvas.draw_text(message, MESSAGE_POS.0, MESSAGE_POS.1, 4, MESSAGE_COLOR);
    }

    // ── Status bar ───────────────────────────────────────────────────────
    let (w, h) = (canvas.width(), canvas.height());
    canvas.fill_rect(0, STATUS_Y.min(h), w, h.saturating_sub(STATUS_Y), STATUS_BG);
    canvas.draw_text(scene.hint, 8, STATUS_Y + 7, 2, STATUS_COLOR);
}

fn draw_hand(canvas: &mut Canvas, hand: &HandLandmarks) {
    let px = hand.to_pixels(canvas.width(), canvas.height());
    for &(a, b) in HAND_CONNECTIONS.iter() {
        canvas.draw_line(px[a], px[b], 2, BONE_COLOR);
    }
    for &p in px.iter() {
        canvas.draw_dot(p, 4, JOINT_COLOR);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Input
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Sim(SimInput),
}

/// Key binding table.
pub fn translate(key: Key) -> Option<Command> {
    let sim = |input| Some(Command::Sim(input));
    match key {
        Key::Q                        => Some(Command::Quit),
        Key::Key0 | Key::NumPad0      => sim(SimInput::Fingers(0)),
        Key::Key1 | Key::NumPad1      => sim(SimInput::Fingers(1)),
        Key::Key2 | Key::NumPad2      => sim(SimInput::Fingers(2)),
        Key::Key3 | Key::NumPad3      => sim(SimInput::Fingers(3)),
        Key::Key4 | Key::NumPad4      => sim(SimInput::Fingers(4)),
        Key::Key5 | Key::NumPad5      => sim(SimInput::Fingers(5)),
        Key::Up                       => sim(SimInput::Thumb(Some(ThumbSign::Positive))),
        Key::Down                     => sim(SimInput::Thumb(Some(ThumbSign::Negative))),
        Key::Right                    => sim(SimInput::Thumb(None)),
        Key::H                        => sim(SimInput::ToggleHand),
        _                             => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

/// Drop a window the user has closed.  True only on the poll that drops it,
/// so one close is reported once.
pub(crate) fn reap_closed<W>(slot: &mut Option<W>, is_open: impl Fn(&W) -> bool) -> bool {
    if slot.as_ref().is_some_and(|w| !is_open(w)) {
        debug!("volume window closed by user");
        *slot = None;
        return true;
    }
    false
}

pub struct Visualizer {
    main:   Window,
    volume: Option<Window>,
    canvas: Canvas,
    sim_tx: Sender<SimInput>,
}

fn open_window(title: &str) -> Result<Window, AppError> {
    let mut window = Window::new(
        title,
        WIN_W, WIN_H,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;
    window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps
    Ok(window)
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        Ok(Visualizer {
            main:   open_window(MAIN_TITLE)?,
            volume: None,
            canvas: Canvas::new(WIN_W, WIN_H, BG_COLOR),
            sim_tx,
        })
    }

    /// Returns false when the main window should close.
    pub fn is_open(&self) -> bool { self.main.is_open() }

    /// Poll both windows' keyboards.  Returns true when the user asked to
    /// leave the current level: `Q`, or closing the volume window.
    pub fn poll_input(&mut self) -> bool {
        let mut keys = self.main.get_keys_pressed(KeyRepeat::No);
        if let Some(volume) = &self.volume {
            keys.extend(volume.get_keys_pressed(KeyRepeat::No));
        }
        let mut quit = reap_closed(&mut self.volume, Window::is_open);

        for key in keys {
            match translate(key) {
                Some(Command::Quit) => quit = true,
                Some(Command::Sim(input)) => {
                    // The simulation source may not exist (camera builds).
                    let _ = self.sim_tx.send(input);
                }
                None => {}
            }
        }
        quit
    }

    /// Open or close the "Volume Control" window.
    pub fn show_volume_window(&mut self, open: bool) -> Result<(), AppError> {
        match (open, self.volume.is_some()) {
            (true, false) => {
                debug!("opening volume window");
                self.volume = Some(open_window(VOLUME_TITLE)?);
            }
            (false, true) => {
                debug!("closing volume window");
                self.volume = None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Render one frame into whichever windows are open.
    pub fn render(&mut self, scene: &Scene) -> Result<(), AppError> {
        draw_scene(&mut self.canvas, scene);
        self.main.update_with_buffer(self.canvas.pixels(), WIN_W, WIN_H)?;
        if let Some(volume) = &mut self.volume {
            volume.update_with_buffer(self.canvas.pixels(), WIN_W, WIN_H)?;
        }
        Ok(())
    }

    /// Keep the windows responsive on frames with nothing new to draw.
    pub fn refresh(&mut self) {
        self.main.update();
        if let Some(volume) = &mut self.volume {
            volume.update();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::{synthetic_hand, FingersUp};

    fn scene<'a>(hands: &'a [HandLandmarks], message: Option<&'a str>) -> Scene<'a> {
        Scene { image: None, hands, fps: 30.0, overlay: None, message, hint: "" }
    }

    fn count(c: &Canvas, color: u32) -> usize {
        c.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn key_bindings() {
        assert_eq!(translate(Key::Q), Some(Command::Quit));
        assert_eq!(translate(Key::Key3), Some(Command::Sim(SimInput::Fingers(3))));
        assert_eq!(translate(Key::NumPad5), Some(Command::Sim(SimInput::Fingers(5))));
        assert_eq!(translate(Key::Up), Some(Command::Sim(SimInput::Thumb(Some(ThumbSign::Positive)))));
        assert_eq!(translate(Key::Right), Some(Command::Sim(SimInput::Thumb(None))));
        assert_eq!(translate(Key::H), Some(Command::Sim(SimInput::ToggleHand)));
        assert_eq!(translate(Key::Key9), None);
    }

    #[test]
    fn closed_window_is_reported_once() {
        let mut slot = Some(true);
        assert!(!reap_closed(&mut slot, |&open| open));
        assert_eq!(slot, Some(true));

        slot = Some(false);
        assert!(reap_closed(&mut slot, |&open| open));
        assert_eq!(slot, None);
        assert!(!reap_closed(&mut slot, |&open| open));
    }

    #[test]
    fn message_is_drawn_only_when_present() {
        let mut c = Canvas::new(WIN_W, WIN_H, 0);
        draw_scene(&mut c, &scene(&[], None));
        assert_eq!(count(&c, MESSAGE_COLOR), 0);
        draw_scene(&mut c, &scene(&[], Some("Confirmed")));
        assert!(count(&c, MESSAGE_COLOR) > 0);
    }

    #[test]
    fn skeleton_is_drawn_for_each_hand() {
        let mut c = Canvas::new(WIN_W, WIN_H, 0);
        draw_scene(&mut c, &scene(&[], None));
        assert_eq!(count(&c, JOINT_COLOR), 0);
        let hand = synthetic_hand(FingersUp::first(2), None);
        draw_scene(&mut c, &scene(std::slice::from_ref(&hand), None));
        assert!(count(&c, JOINT_COLOR) > 0);
        assert!(count(&c, BONE_COLOR) > 0);
    }

    #[test]
    fn camera_image_replaces_background() {
        let mut c = Canvas::new(WIN_W, WIN_H, 0);
        let img = Image { width: 1, height: 1, pixels: vec![0xFF12_3456] };
        let s = Scene { image: Some(&img), ..scene(&[], None) };
        draw_scene(&mut c, &s);
        assert_eq!(c.pixel(WIN_W - 1, 200), Some(0xFF12_3456));
        assert_eq!(count(&c, BG_COLOR), 0);
    }
}
