//! The hold-then-commit primitive shared by the menu and the volume action.

use std::time::{Duration, Instant};

/// Result of feeding one observation to a [`HoldTimer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hold {
    /// The value differs from the previous one; the timer restarted at zero.
    Restarted,
    /// Same value as before, held for less than the threshold.
    Holding(Duration),
    /// Same value as before, held for at least the threshold.
    Reached(Duration),
}

impl Hold {
    pub fn is_reached(self) -> bool {
        matches!(self, Hold::Reached(_))
    }
}

/// Tracks how long the same value has been observed without interruption.
///
/// A single differing observation resets the timer.  Frames with nothing to
/// observe should simply not call [`observe`](Self::observe): the start time
/// is kept, so time spent without observations still counts.
pub struct HoldTimer<T> {
    threshold: Duration,
    same:      fn(&T, &T) -> bool,
    current:   Option<(T, Instant)>,
}

impl<T: PartialEq> HoldTimer<T> {
    pub fn new(threshold: Duration) -> Self {
        Self::with_predicate(threshold, <T as PartialEq>::eq)
    }
}

impl<T> HoldTimer<T> {
    /// A timer that treats two observations as "the same" when `same` says so.
    pub fn with_predicate(threshold: Duration, same: fn(&T, &T) -> bool) -> Self {
        HoldTimer { threshold, same, current: None }
    }

    pub fn observe(&mut self, value: T, now: Instant) -> Hold {
        match &self.current {
            Some((held, since)) if (self.same)(held, &value) => {
                let elapsed = now.saturating_duration_since(*since);
                if elapsed >= self.threshold {
                    Hold::Reached(elapsed)
                } else {
                    Hold::Holding(elapsed)
                }
            }
            _ => {
                self.current = Some((value, now));
                Hold::Restarted
            }
        }
    }

    /// Forget the held value; the next observation restarts the timer.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn value(&self) -> Option<&T> {
        self.current.as_ref().map(|(v, _)| v)
    }

    /// Time since the current value was first seen.
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.current.as_ref().map(|(_, since)| now.saturating_duration_since(*since))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn first_observation_restarts() {
        let mut t = HoldTimer::new(secs(5.0));
        assert_eq!(t.observe(2u8, Instant::now()), Hold::Restarted);
        assert_eq!(t.value(), Some(&2));
    }

    #[test]
    fn reaches_threshold_after_steady_observations() {
        let t0 = Instant::now();
        let mut t = HoldTimer::new(secs(5.0));
        t.observe(1u8, t0);
        assert_eq!(t.observe(1, t0 + secs(4.9)), Hold::Holding(secs(4.9)));
        assert!(t.observe(1, t0 + secs(5.0)).is_reached());
    }

    #[test]
    fn single_mismatch_resets_to_zero() {
        let t0 = Instant::now();
        let mut t = HoldTimer::new(secs(5.0));
        t.observe(1u8, t0);
        t.observe(1, t0 + secs(4.0));
        assert_eq!(t.observe(3, t0 + secs(4.5)), Hold::Restarted);
        assert_eq!(t.observe(1, t0 + secs(4.6)), Hold::Restarted);
        assert_eq!(t.observe(1, t0 + secs(9.0)), Hold::Holding(secs(9.0) - secs(4.6)));
    }

    #[test]
    fn gaps_without_observation_still_count() {
        let t0 = Instant::now();
        let mut t = HoldTimer::new(secs(5.0));
        t.observe('a', t0);
        assert!(t.observe('a', t0 + secs(6.0)).is_reached());
    }

    #[test]
    fn clear_forgets_value() {
        let t0 = Instant::now();
        let mut t = HoldTimer::new(secs(1.0));
        t.observe(7u8, t0);
        t.clear();
        assert_eq!(t.elapsed(t0 + secs(3.0)), None);
        assert_eq!(t.observe(7, t0 + secs(3.0)), Hold::Restarted);
    }

    #[test]
    fn custom_predicate_groups_values() {
        let t0 = Instant::now();
        let mut t = HoldTimer::with_predicate(secs(1.0), |a: &u8, b: &u8| (a >= &3) == (b >= &3));
        t.observe(3, t0);
        assert!(t.observe(5, t0 + secs(1.5)).is_reached());
    }
}
