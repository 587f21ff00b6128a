//! Timing constants for the hold gates and on-screen feedback.

use std::time::Duration;

/// How long a finger count or thumb sign must stay unchanged to commit.
pub const HOLD_THRESHOLD: Duration = Duration::from_secs(5);

/// How long a transient message stays on screen.
pub const MESSAGE_DURATION: Duration = Duration::from_secs(3);

/// Pause after a volume change before returning to the menu.
pub const POST_ACTION_PAUSE: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub hold:        Duration,
    pub message:     Duration,
    pub post_action: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            hold:        HOLD_THRESHOLD,
            message:     MESSAGE_DURATION,
            post_action: POST_ACTION_PAUSE,
        }
    }
}
