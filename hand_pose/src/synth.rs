//! Synthesized hand poses.
//!
//! Used by the keyboard simulation source (no camera needed) and by tests
//! that want a hand with a known finger count and thumb sign.

use crate::classify::{Digit, FingersUp, ThumbSign};
use crate::landmark::{HandLandmarks, Point, LANDMARK_COUNT, THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST};

/// Thumb tip offset above / below the IP joint when a sign is shown.
const SIGN_OFFSET: f32 = 0.04;

/// A right-hand-facing-camera pose centred in the frame.
pub fn synthetic_hand(fingers: FingersUp, sign: Option<ThumbSign>) -> HandLandmarks {
    synthetic_hand_at(fingers, sign, Point::new(0.5, 0.5), 1.0)
}

/// Same pose as [`synthetic_hand`], with the knuckle line centred on
/// `center` and every offset multiplied by `scale`.
pub fn synthetic_hand_at(
    fingers: FingersUp,
    sign:    Option<ThumbSign>,
    center:  Point,
    scale:   f32,
) -> HandLandmarks {
    let at = |dx: f32, dy: f32| Point::new(center.x + dx * scale, center.y + dy * scale);
    let mut pts = [Point::default(); LANDMARK_COUNT];

    pts[WRIST] = at(0.01, 0.25);

    // ── Thumb: extension is sideways, sign is vertical ───────────────────
    pts[THUMB_CMC] = at(-0.05, 0.18);
    pts[THUMB_MCP] = at(-0.09, 0.12);
    let (ip_dx, tip_dx) = if fingers.is_up(Digit::Thumb) { (-0.13, -0.16) } else { (-0.07, -0.04) };
    pts[THUMB_IP] = at(ip_dx, 0.07);
    let ip_y = pts[THUMB_IP].y;
    let tip_y = match sign {
        Some(ThumbSign::Positive) => ip_y - SIGN_OFFSET * scale,
        Some(ThumbSign::Negative) => ip_y + SIGN_OFFSET * scale,
        None                      => ip_y,
    };
    pts[THUMB_TIP] = Point::new(center.x + tip_dx * scale, tip_y);

    // ── Index → pinky: one column each, tip above PIP when raised ───────
    for digit in [Digit::Index, Digit::Middle, Digit::Ring, Digit::Pinky] {
        let col = -0.03 + 0.03 * (digit as usize - 1) as f32;
        let mcp = digit.tip() - 3;
        let (pip, dip, tip) = if fingers.is_up(digit) {
            (-0.08, -0.13, -0.17)
        } else {
            (-0.06, -0.02, 0.01)
        };
        pts[mcp]     = at(col, 0.0);
        pts[mcp + 1] = at(col, pip);
        pts[mcp + 2] = at(col, dip);
        pts[mcp + 3] = at(col, tip);
    }

    HandLandmarks::new(pts)
}
