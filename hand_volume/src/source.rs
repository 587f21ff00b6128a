//! Landmark sources: where each frame's hands come from.
//!
//! The app only sees the [`LandmarkSource`] trait.  The default build uses
//! [`SimLandmarkSource`], a synthesized hand steered from the keyboard; the
//! `camera` feature adds a webcam source (see `camera.rs`).

use std::sync::mpsc::{Receiver, TryRecvError};

use hand_pose::{synthetic_hand_at, FingersUp, HandLandmarks, Point, ThumbSign};
use thiserror::Error;
use tracing::debug;

// ════════════════════════════════════════════════════════════════════════════
// Frame / Image
// ════════════════════════════════════════════════════════════════════════════

/// A captured picture, row-major, one `0xAARRGGBB` word per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width:  usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

/// One processed frame: the optional background picture and every hand
/// detected in it (possibly none).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub image: Option<Image>,
    pub hands: Vec<HandLandmarks>,
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("camera {index} could not be opened: {reason}")]
    CameraUnavailable { index: i32, reason: String },

    #[error("hand detector unavailable: {0}")]
    DetectorUnavailable(String),

    #[error("input source disconnected")]
    Disconnected,

    /// A single bad frame; the next one may be fine.
    #[error("bad frame: {0}")]
    Frame(String),
}

impl SourceError {
    /// Device loss or setup failure, as opposed to a one-off frame fault.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SourceError::Frame(_))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

pub trait LandmarkSource {
    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<Frame, SourceError>;

    /// Short label for logs and the banner.
    fn name(&self) -> &'static str;
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource (keyboard driven)
// ════════════════════════════════════════════════════════════════════════════

/// Pose edits sent from the visualizer's keyboard handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    /// Raise this many fingers (index first, thumb last).
    Fingers(u8),
    /// Point the thumb up / down, or level it with `None`.
    Thumb(Option<ThumbSign>),
    /// Take the hand out of view, or bring it back.
    ToggleHand,
}

/// Where the synthesized hand sits in the frame.
const SIM_CENTER: Point = Point::new(0.5, 0.55);
const SIM_SCALE:  f32   = 1.6;

pub struct SimLandmarkSource {
    rx:      Receiver<SimInput>,
    fingers: u8,
    sign:    Option<ThumbSign>,
    visible: bool,
}

impl SimLandmarkSource {
    /// Starts with a visible closed fist and a level thumb.
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimLandmarkSource { rx, fingers: 0, sign: None, visible: true }
    }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Fingers(n)  => self.fingers = n.min(5),
            SimInput::Thumb(sign) => self.sign = sign,
            SimInput::ToggleHand  => self.visible = !self.visible,
        }
        debug!(?input, fingers = self.fingers, visible = self.visible, "simulated pose changed");
    }

    pub fn current_hand(&self) -> Option<HandLandmarks> {
        self.visible.then(|| synthetic_hand_at(FingersUp::first(self.fingers), self.sign, SIM_CENTER, SIM_SCALE))
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn next_frame(&mut self) -> Result<Frame, SourceError> {
        // Drain all pending edits (non-blocking)
        loop {
            match self.rx.try_recv() {
                Ok(input)                       => self.apply(input),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => return Err(SourceError::Disconnected),
            }
        }
        Ok(Frame { image: None, hands: self.current_hand().into_iter().collect() })
    }

    fn name(&self) -> &'static str {
        "keyboard simulation"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::{fingers_up, thumb_sign};
    use std::sync::mpsc;

    #[test]
    fn starts_with_a_fist() {
        let (_tx, rx) = mpsc::channel();
        let mut src = SimLandmarkSource::new(rx);
        let frame = src.next_frame().unwrap();
        assert!(frame.image.is_none());
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(fingers_up(&frame.hands[0]).count(), 0);
        assert_eq!(thumb_sign(&frame.hands[0]), None);
    }

    #[test]
    fn inputs_are_applied_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut src = SimLandmarkSource::new(rx);
        tx.send(SimInput::Fingers(2)).unwrap();
        tx.send(SimInput::Fingers(3)).unwrap();
        tx.send(SimInput::Thumb(Some(ThumbSign::Negative))).unwrap();
        let hand = &src.next_frame().unwrap().hands[0];
        assert_eq!(fingers_up(hand).count(), 3);
        assert_eq!(thumb_sign(hand), Some(ThumbSign::Negative));
    }

    #[test]
    fn five_fingers_include_thumb() {
        let (tx, rx) = mpsc::channel();
        let mut src = SimLandmarkSource::new(rx);
        tx.send(SimInput::Fingers(9)).unwrap();
        let hand = &src.next_frame().unwrap().hands[0];
        assert_eq!(fingers_up(hand), FingersUp::ALL);
    }

    #[test]
    fn hidden_hand_yields_empty_frames() {
        let (tx, rx) = mpsc::channel();
        let mut src = SimLandmarkSource::new(rx);
        tx.send(SimInput::ToggleHand).unwrap();
        assert!(src.next_frame().unwrap().hands.is_empty());
        tx.send(SimInput::ToggleHand).unwrap();
        assert_eq!(src.next_frame().unwrap().hands.len(), 1);
    }

    #[test]
    fn dropped_sender_is_fatal() {
        let (tx, rx) = mpsc::channel::<SimInput>();
        let mut src = SimLandmarkSource::new(rx);
        drop(tx);
        let err = src.next_frame().unwrap_err();
        assert!(matches!(err, SourceError::Disconnected));
        assert!(err.is_fatal());
        assert!(!SourceError::Frame("glitch".into()).is_fatal());
    }

    #[test]
    fn simulated_hand_stays_inside_the_frame() {
        let (tx, rx) = mpsc::channel();
        let mut src = SimLandmarkSource::new(rx);
        for n in 0..=5 {
            tx.send(SimInput::Fingers(n)).unwrap();
            for sign in [None, Some(ThumbSign::Positive), Some(ThumbSign::Negative)] {
                tx.send(SimInput::Thumb(sign)).unwrap();
                let hand = &src.next_frame().unwrap().hands[0];
                assert!(hand.points().iter().all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
            }
        }
    }
}
