//! Transient on-screen messages.

use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
struct Message {
    text:     String,
    shown_at: Instant,
}

/// Holds at most one message, visible for `duration` after it was shown.
#[derive(Debug)]
pub struct MessageBoard {
    duration: Duration,
    current:  Option<Message>,
}

impl MessageBoard {
    pub fn new(duration: Duration) -> Self {
        MessageBoard { duration, current: None }
    }

    /// Replace whatever is showing with `text`, starting now.
    pub fn show(&mut self, text: impl Into<String>, now: Instant) {
        self.current = Some(Message { text: text.into(), shown_at: now });
    }

    /// The message to draw at `now`, clearing it once it has expired.
    /// Visible for `[shown_at, shown_at + duration)`.
    pub fn active(&mut self, now: Instant) -> Option<&str> {
        let expired = self.current.as_ref()
            .is_some_and(|m| now.saturating_duration_since(m.shown_at) >= self.duration);
        if expired {
            self.current = None;
        }
        self.current.as_ref().map(|m| m.text.as_str())
    }
}
