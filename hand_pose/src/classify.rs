//! Per-frame gesture classification: raised fingers and thumb sign.

use crate::landmark::{HandLandmarks, THUMB_IP, THUMB_TIP};

// ════════════════════════════════════════════════════════════════════════════
// Digit
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Digit {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Digit {
    pub const ALL: [Digit; 5] = [Digit::Thumb, Digit::Index, Digit::Middle, Digit::Ring, Digit::Pinky];

    /// Landmark index of the fingertip.
    pub fn tip(self) -> usize {
        4 + 4 * self as usize
    }

    /// Joint the tip is compared against: two landmarks down the same digit.
    pub fn reference(self) -> usize {
        self.tip() - 2
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FingersUp
// ════════════════════════════════════════════════════════════════════════════

/// One flag per digit, in [`Digit::ALL`] order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingersUp(pub [bool; 5]);

impl FingersUp {
    pub const NONE: FingersUp = FingersUp([false; 5]);
    pub const ALL: FingersUp = FingersUp([true; 5]);

    /// The first `n` fingers in raising order (index, middle, ring, pinky,
    /// then thumb), which is how people usually count on one hand.
    pub fn first(n: u8) -> Self {
        const ORDER: [Digit; 5] = [Digit::Index, Digit::Middle, Digit::Ring, Digit::Pinky, Digit::Thumb];
        let mut up = [false; 5];
        for d in ORDER.iter().take(n as usize) {
            up[*d as usize] = true;
        }
        FingersUp(up)
    }

    pub fn is_up(&self, digit: Digit) -> bool {
        self.0[digit as usize]
    }

    pub fn count(&self) -> u8 {
        self.0.iter().filter(|&&up| up).count() as u8
    }
}

/// Which digits are extended.
///
/// The thumb is judged on the x-axis: tip left of the MCP joint counts as
/// up. This is not mirrored for left hands or flipped cameras. The other
/// four digits are up when the tip sits above (smaller y) its PIP joint.
/// Degenerate input (coincident or NaN points) reads as all-down.
pub fn fingers_up(hand: &HandLandmarks) -> FingersUp {
    let mut up = [false; 5];
    for digit in Digit::ALL {
        let tip = hand.point(digit.tip());
        let reference = hand.point(digit.reference());
        up[digit as usize] = match digit {
            Digit::Thumb => tip.x < reference.x,
            _            => tip.y < reference.y,
        };
    }
    FingersUp(up)
}

// ════════════════════════════════════════════════════════════════════════════
// ThumbSign
// ════════════════════════════════════════════════════════════════════════════

/// Thumb-up / thumb-down gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThumbSign {
    Positive,
    Negative,
}

/// Thumb tip above the IP joint is positive, below is negative, level is
/// no sign at all.
pub fn thumb_sign(hand: &HandLandmarks) -> Option<ThumbSign> {
    let tip = hand.point(THUMB_TIP);
    let base = hand.point(THUMB_IP);
    if tip.y < base.y {
        Some(ThumbSign::Positive)
    } else if tip.y > base.y {
        Some(ThumbSign::Negative)
    } else {
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Point, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, THUMB_MCP};
    use crate::synth::synthetic_hand;

    #[test]
    fn digit_indices_match_mediapipe() {
        assert_eq!(Digit::Thumb.tip(), 4);
        assert_eq!(Digit::Index.tip(), 8);
        assert_eq!(Digit::Pinky.tip(), 20);
        assert_eq!(Digit::Middle.reference(), 10);
    }

    #[test]
    fn thumb_only_up_by_x_convention() {
        let hand = synthetic_hand(FingersUp([true, false, false, false, false]), None);
        let up = fingers_up(&hand);
        assert_eq!(up, FingersUp([true, false, false, false, false]));
        assert!(hand.point(THUMB_TIP).x < hand.point(THUMB_MCP).x);
    }

    #[test]
    fn counts_each_raised_finger() {
        for n in 0..=5 {
            let hand = synthetic_hand(FingersUp::first(n), None);
            assert_eq!(fingers_up(&hand).count(), n, "n = {}", n);
        }
    }

    #[test]
    fn index_uses_y_axis() {
        let mut pts = [Point::new(0.5, 0.5); LANDMARK_COUNT];
        pts[INDEX_TIP] = Point::new(0.5, 0.2);
        pts[INDEX_PIP] = Point::new(0.5, 0.4);
        let up = fingers_up(&HandLandmarks::new(pts));
        assert!(up.is_up(Digit::Index));
        assert_eq!(up.count(), 1);
    }

    #[test]
    fn degenerate_hand_is_all_down() {
        let hand = HandLandmarks::new([Point::new(0.3, 0.3); LANDMARK_COUNT]);
        assert_eq!(fingers_up(&hand), FingersUp::NONE);
        let nan = HandLandmarks::new([Point::new(f32::NAN, f32::NAN); LANDMARK_COUNT]);
        assert_eq!(fingers_up(&nan), FingersUp::NONE);
    }

    #[test]
    fn thumb_sign_follows_vertical_order() {
        let up = synthetic_hand(FingersUp::NONE, Some(ThumbSign::Positive));
        let down = synthetic_hand(FingersUp::NONE, Some(ThumbSign::Negative));
        let level = synthetic_hand(FingersUp::NONE, None);
        assert_eq!(thumb_sign(&up), Some(ThumbSign::Positive));
        assert_eq!(thumb_sign(&down), Some(ThumbSign::Negative));
        assert_eq!(thumb_sign(&level), None);
    }

    #[test]
    fn first_raises_thumb_last() {
        assert!(!FingersUp::first(4).is_up(Digit::Thumb));
        assert_eq!(FingersUp::first(5), FingersUp::ALL);
        assert_eq!(FingersUp::first(9), FingersUp::ALL);
    }
}
