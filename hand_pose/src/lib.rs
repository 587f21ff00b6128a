//! # hand_pose
//!
//! The 21-point hand landmark model (MediaPipe numbering) and the two
//! per-frame signals derived from it:
//!
//! * [`fingers_up`]: which of the five digits are extended, and from that
//!   the raised-finger count (0–5).
//! * [`thumb_sign`]: thumb pointing up ([`ThumbSign::Positive`]) or down
//!   ([`ThumbSign::Negative`]).
//!
//! Everything here is pure: no state survives a frame.
//!
//! ## Coordinates
//!
//! Points are normalised image coordinates, `x` to the right and `y`
//! **downward**, so a raised fingertip has a *smaller* `y` than its joint.
//!
//! ```rust
//! use hand_pose::{synthetic_hand, fingers_up, thumb_sign, FingersUp, ThumbSign};
//!
//! let hand = synthetic_hand(FingersUp::first(3), Some(ThumbSign::Positive));
//! assert_eq!(fingers_up(&hand).count(), 3);
//! assert_eq!(thumb_sign(&hand), Some(ThumbSign::Positive));
//! ```

pub mod landmark;
pub mod classify;
pub mod synth;

pub use landmark::{HandLandmarks, Point, PoseError, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use classify::{fingers_up, thumb_sign, Digit, FingersUp, ThumbSign};
pub use synth::{synthetic_hand, synthetic_hand_at};
