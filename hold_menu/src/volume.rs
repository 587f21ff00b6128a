//! The volume-adjustment action (menu option 1).
//!
//! Stepped once per frame while it runs.  Holding 1–5 fingers for the hold
//! threshold picks one of five levels; the action then pauses briefly so the
//! user can read the result, and reports [`ActionStep::Done`].

use std::fmt;
use std::time::{Duration, Instant};

use hand_pose::{fingers_up, HandLandmarks};
use tracing::{debug, info};

use crate::hold::{Hold, HoldTimer};
use crate::timing::Timing;

// ════════════════════════════════════════════════════════════════════════════
// VolumeLevel
// ════════════════════════════════════════════════════════════════════════════

/// One of the five selectable volume levels, as a scalar in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeLevel(f32);

impl VolumeLevel {
    /// 1 finger → 0 %, 2 → 25 %, 3 → 50 %, 4 → 75 %, 5 → 100 %.
    /// Any other count has no level.
    pub fn from_finger_count(count: u8) -> Option<Self> {
        match count {
            1..=5 => Some(VolumeLevel((count - 1) as f32 * 0.25)),
            _ => None,
        }
    }

    pub fn scalar(self) -> f32 {
        self.0
    }

    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Feedback text shown once the level has been applied.
    pub fn message(self) -> String {
        format!("Volume: {}%", self.percent())
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// VolumeAction
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionStep {
    /// Nothing decided this frame.
    Continue,
    /// Apply this level now.  Emitted once per action run.
    Set(VolumeLevel),
    /// The post-change pause is over; return to the menu.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Stage {
    Adjusting,
    Settling { level: VolumeLevel, until: Instant },
}

pub struct VolumeAction {
    hold:        HoldTimer<u8>,
    stage:       Stage,
    post_action: Duration,
}

impl VolumeAction {
    pub fn new(timing: &Timing) -> Self {
        VolumeAction {
            hold:        HoldTimer::new(timing.hold),
            stage:       Stage::Adjusting,
            post_action: timing.post_action,
        }
    }

    /// Advance one frame with the hands detected in it.
    pub fn step(&mut self, hands: &[HandLandmarks], now: Instant) -> ActionStep {
        if let Stage::Settling { until, .. } = self.stage {
            return if now >= until { ActionStep::Done } else { ActionStep::Continue };
        }

        for hand in hands {
            let count = fingers_up(hand).count();
            match self.hold.observe(count, now) {
                Hold::Reached(_) => {
                    // Counts without a level keep waiting; the user can still change hands.
                    let Some(level) = VolumeLevel::from_finger_count(count) else {
                        continue;
                    };
                    info!(%level, count, "volume level chosen");
                    self.stage = Stage::Settling { level, until: now + self.post_action };
                    return ActionStep::Set(level);
                }
                Hold::Restarted => debug!(count, "volume finger count changed"),
                Hold::Holding(_) => {}
            }
        }
        ActionStep::Continue
    }

    /// How long the current finger count has been held, while still choosing.
    pub fn waiting(&self, now: Instant) -> Option<Duration> {
        match self.stage {
            Stage::Adjusting => self.hold.elapsed(now),
            Stage::Settling { .. } => None,
        }
    }

    /// The level already applied, while in the post-change pause.
    pub fn applied(&self) -> Option<VolumeLevel> {
        match self.stage {
            Stage::Settling { level, .. } => Some(level),
            Stage::Adjusting => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
