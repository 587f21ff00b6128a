//! Menu selection and thumb-sign confirmation.
//!
//! `MenuMachine` owns the phase and the two hold timers (finger count while
//! selecting, thumb sign while confirming).  It is stepped once per detected
//! hand per frame and reports what changed as a [`MenuEvent`].

use std::fmt;
use std::time::{Duration, Instant};

use hand_pose::{fingers_up, thumb_sign, HandLandmarks, ThumbSign};
use tracing::{debug, info};

use crate::hold::{Hold, HoldTimer};

// ════════════════════════════════════════════════════════════════════════════
// MenuOption
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuOption {
    /// Volume control.
    One,
    /// Reserved; selectable and confirmable but has no action.
    Two,
}

impl MenuOption {
    /// The option picked by holding up `count` fingers, if any.
    pub fn from_finger_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(MenuOption::One),
            2 => Some(MenuOption::Two),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            MenuOption::One => 1,
            MenuOption::Two => 2,
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Option {}", self.number())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Phase / MenuEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    Confirming(MenuOption),
    ActionRunning(MenuOption),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Selected(MenuOption),
    Confirmed(MenuOption),
    Cancelled(MenuOption),
}

impl MenuEvent {
    /// Feedback text shown to the user.
    pub fn message(self) -> String {
        match self {
            MenuEvent::Selected(option) => format!("{} selected", option),
            MenuEvent::Confirmed(_)     => "Confirmed".to_string(),
            MenuEvent::Cancelled(_)     => "Cancelled".to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MenuMachine
// ════════════════════════════════════════════════════════════════════════════

pub struct MenuMachine {
    phase:      Phase,
    count_hold: HoldTimer<u8>,
    sign_hold:  HoldTimer<ThumbSign>,
}

impl MenuMachine {
    pub fn new(hold: Duration) -> Self {
        MenuMachine {
            phase:      Phase::AwaitingSelection,
            count_hold: HoldTimer::new(hold),
            sign_hold:  HoldTimer::new(hold),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed one detected hand.  Does nothing while an action is running.
    pub fn observe(&mut self, hand: &HandLandmarks, now: Instant) -> Option<MenuEvent> {
        match self.phase {
            Phase::AwaitingSelection => {
                let count = fingers_up(hand).count();
                match self.count_hold.observe(count, now) {
                    Hold::Reached(_) => {
                        let option = MenuOption::from_finger_count(count)?;
                        self.phase = Phase::Confirming(option);
                        self.sign_hold.clear();
                        info!(%option, "menu option selected, awaiting thumb sign");
                        Some(MenuEvent::Selected(option))
                    }
                    Hold::Restarted => {
                        debug!(count, "finger count changed");
                        None
                    }
                    Hold::Holding(_) => None,
                }
            }

            Phase::Confirming(option) => {
                // No sign (level thumb) breaks the hold like a changed sign.
                let Some(sign) = thumb_sign(hand) else {
                    self.sign_hold.clear();
                    return None;
                };
                if !self.sign_hold.observe(sign, now).is_reached() {
                    return None;
                }
                match sign {
                    ThumbSign::Positive => {
                        self.phase = Phase::ActionRunning(option);
                        info!(%option, "selection confirmed");
                        Some(MenuEvent::Confirmed(option))
                    }
                    ThumbSign::Negative => {
                        self.reset();
                        info!(%option, "selection cancelled");
                        Some(MenuEvent::Cancelled(option))
                    }
                }
            }

            Phase::ActionRunning(_) => None,
        }
    }

    /// Return to selection once the running action has finished.
    pub fn finish_action(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = Phase::AwaitingSelection;
        self.count_hold.clear();
        self.sign_hold.clear();
    }

    /// How long the current selection count has been held.
    pub fn selection_elapsed(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::AwaitingSelection => self.count_hold.elapsed(now),
            _ => None,
        }
    }

    /// How long the current thumb sign has been held.
    pub fn confirmation_elapsed(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Confirming(_) => self.sign_hold.elapsed(now),
            _ => None,
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

    const HOLD: Duration = Duration::from_secs(5);

    fn fingers(n: u8) -> HandLandmarks {
        synthetic_hand(FingersUp::first(n), None)
    }

    fn thumb(sign: ThumbSign) -> HandLandmarks {
        synthetic_hand(FingersUp::NONE, Some(sign))
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    /// Feed `hand` every 100 ms over `[from_ms, to_ms]`, collecting events.
    fn hold_for(m: &mut MenuMachine, hand: &HandLandmarks, t0: Instant, from_ms: u64, to_ms: u64) -> Vec<MenuEvent> {
        (from_ms..=to_ms)
            .step_by(100)
            .filter_map(|ms| m.observe(hand, at(t0, ms)))
            .collect()
    }

    #[test]
    fn option_from_count() {
        assert_eq!(MenuOption::from_finger_count(1), Some(MenuOption::One));
        assert_eq!(MenuOption::from_finger_count(2), Some(MenuOption::Two));
        assert_eq!(MenuOption::from_finger_count(0), None);
        assert_eq!(MenuOption::from_finger_count(3), None);
    }

    #[test]
    fn one_finger_held_selects_once() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        let events = hold_for(&mut m, &fingers(1), t0, 0, 6_000);
        assert_eq!(events, vec![MenuEvent::Selected(MenuOption::One)]);
        assert_eq!(m.phase(), Phase::Confirming(MenuOption::One));
    }

    #[test]
    fn three_fingers_never_select() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        let events = hold_for(&mut m, &fingers(3), t0, 0, 20_000);
        assert!(events.is_empty());
        assert_eq!(m.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn noisy_frame_restarts_selection_hold() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        hold_for(&mut m, &fingers(2), t0, 0, 4_500);
        assert_eq!(m.observe(&fingers(3), at(t0, 4_600)), None);
        let events = hold_for(&mut m, &fingers(2), t0, 4_700, 9_600);
        assert!(events.is_empty(), "hold restarted at 4.7 s, so 9.6 s is too early");
        assert_eq!(m.selection_elapsed(at(t0, 9_600)), Some(Duration::from_millis(4_900)));
        assert_eq!(m.observe(&fingers(2), at(t0, 9_800)), Some(MenuEvent::Selected(MenuOption::Two)));
    }

    #[test]
    fn thumb_up_confirms() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        hold_for(&mut m, &fingers(1), t0, 0, 5_000);
        let events = hold_for(&mut m, &thumb(ThumbSign::Positive), t0, 5_100, 10_200);
        assert_eq!(events, vec![MenuEvent::Confirmed(MenuOption::One)]);
        assert_eq!(m.phase(), Phase::ActionRunning(MenuOption::One));
    }

    #[test]
    fn thumb_down_cancels_and_clears_selection() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        hold_for(&mut m, &fingers(2), t0, 0, 5_000);
        let events = hold_for(&mut m, &thumb(ThumbSign::Negative), t0, 5_100, 10_100);
        assert_eq!(events, vec![MenuEvent::Cancelled(MenuOption::Two)]);
        assert_eq!(m.phase(), Phase::AwaitingSelection);
        assert_eq!(m.selection_elapsed(at(t0, 10_300)), None);
    }

    #[test]
    fn level_thumb_breaks_confirmation_hold() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        hold_for(&mut m, &fingers(1), t0, 0, 5_000);
        hold_for(&mut m, &thumb(ThumbSign::Positive), t0, 5_100, 9_000);
        assert_eq!(m.observe(&fingers(0), at(t0, 9_100)), None);
        assert_eq!(m.confirmation_elapsed(at(t0, 9_100)), None);
        assert_eq!(m.observe(&thumb(ThumbSign::Positive), at(t0, 10_500)), None);
        assert_eq!(m.phase(), Phase::Confirming(MenuOption::One));
    }

    #[test]
    fn sign_hold_starts_fresh_each_confirmation() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        hold_for(&mut m, &fingers(1), t0, 0, 5_000);
        hold_for(&mut m, &thumb(ThumbSign::Positive), t0, 5_100, 10_200);
        m.finish_action();

        hold_for(&mut m, &fingers(1), t0, 20_000, 25_000);
        assert_eq!(m.phase(), Phase::Confirming(MenuOption::One));
        // A stale positive sign from the previous round must not confirm instantly.
        assert_eq!(m.observe(&thumb(ThumbSign::Positive), at(t0, 25_100)), None);
    }

    #[test]
    fn observe_is_inert_while_action_runs() {
        let t0 = Instant::now();
        let mut m = MenuMachine::new(HOLD);
        hold_for(&mut m, &fingers(1), t0, 0, 5_000);
        hold_for(&mut m, &thumb(ThumbSign::Positive), t0, 5_100, 10_200);
        let events = hold_for(&mut m, &fingers(2), t0, 10_300, 30_000);
        assert!(events.is_empty());
    }

    #[test]
    fn messages_read_naturally() {
        assert_eq!(MenuEvent::Selected(MenuOption::Two).message(), "Option 2 selected");
        assert_eq!(MenuEvent::Confirmed(MenuOption::One).message(), "Confirmed");
        assert_eq!(MenuEvent::Cancelled(MenuOption::One).message(), "Cancelled");
    }
}
