//! Top-level per-frame dispatch.
//!
//! `Controller` owns the menu machine and, while option 1 runs, the volume
//! action.  Exactly one of them is stepped per frame, chosen by its mode.
//! The caller carries out the returned [`Effect`]s (show a message, set the
//! system volume) and reads [`Controller::overlay`] for progress feedback.

use std::time::{Duration, Instant};

use hand_pose::HandLandmarks;
use tracing::{info, warn};

use crate::menu::{MenuMachine, MenuOption, Phase};
use crate::timing::Timing;
use crate::volume::{ActionStep, VolumeAction, VolumeLevel};

// ════════════════════════════════════════════════════════════════════════════
// Effect / Overlay
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Show a transient message.
    Notify(String),
    /// Set the system output volume.
    SetVolume(VolumeLevel),
}

/// Hold-progress readout drawn over the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// Finger count held while choosing a menu option or a volume level.
    Waiting(Duration),
    /// Thumb sign held while confirming.
    Confirming(Duration),
}

impl Overlay {
    pub fn text(self) -> String {
        match self {
            Overlay::Waiting(d)    => format!("Waiting... {}s", d.as_secs()),
            Overlay::Confirming(d) => format!("Confirming... {}s", d.as_secs()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mode
// ════════════════════════════════════════════════════════════════════════════

enum Mode {
    Menu,
    Action(VolumeAction),
}

// ════════════════════════════════════════════════════════════════════════════
// Controller
// ════════════════════════════════════════════════════════════════════════════

pub struct Controller {
    timing:        Timing,
    menu:          MenuMachine,
    mode:          Mode,
    stall_logged:  bool,
}

impl Controller {
    pub fn new(timing: Timing) -> Self {
        Controller {
            timing,
            menu:         MenuMachine::new(timing.hold),
            mode:         Mode::Menu,
            stall_logged: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.menu.phase()
    }

    /// True while the volume action owns the frame loop.
    pub fn in_action(&self) -> bool {
        matches!(self.mode, Mode::Action(_))
    }

    /// Process one frame's hands.
    pub fn step(&mut self, hands: &[HandLandmarks], now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();

        match &mut self.mode {
            Mode::Menu => {
                for hand in hands {
                    if let Some(event) = self.menu.observe(hand, now) {
                        effects.push(Effect::Notify(event.message()));
                    }
                }
                if let Phase::ActionRunning(option) = self.menu.phase() {
                    self.dispatch(option);
                }
            }

            Mode::Action(action) => match action.step(hands, now) {
                ActionStep::Continue => {}
                ActionStep::Set(level) => {
                    // Notify first so a failed volume set can replace the text.
                    effects.push(Effect::Notify(level.message()));
                    effects.push(Effect::SetVolume(level));
                }
                ActionStep::Done => self.end_action(),
            },
        }

        effects
    }

    fn dispatch(&mut self, option: MenuOption) {
        match option {
            MenuOption::One => {
                info!("starting volume control");
                self.mode = Mode::Action(VolumeAction::new(&self.timing));
            }
            MenuOption::Two => {
                // No handler exists for option 2: stay in ActionRunning.
                if !self.stall_logged {
                    warn!(%option, "confirmed option has no action; menu is stalled until quit");
                    self.stall_logged = true;
                }
            }
        }
    }

    fn end_action(&mut self) {
        info!("volume control finished, back to menu");
        self.mode = Mode::Menu;
        self.menu.finish_action();
    }

    /// Leave the running volume action early (quit key inside the action).
    /// Returns false when no action was running.
    pub fn abort_action(&mut self) -> bool {
        if !self.in_action() {
            return false;
        }
        info!("volume control aborted");
        self.end_action();
        true
    }

    pub fn overlay(&self, now: Instant) -> Option<Overlay> {
        match &self.mode {
            Mode::Action(action) => action.waiting(now).map(Overlay::Waiting),
            Mode::Menu => match self.menu.phase() {
                Phase::AwaitingSelection => self.menu.selection_elapsed(now).map(Overlay::Waiting),
                Phase::Confirming(_)     => self.menu.confirmation_elapsed(now).map(Overlay::Confirming),
                Phase::ActionRunning(_)  => None,
            },
        }
    }

    /// One-line instruction for the current phase.
    pub fn hint(&self) -> &'static str {
        match (&self.mode, self.menu.phase()) {
            (Mode::Action(a), _) if a.applied().is_some() => "Volume set",
            (Mode::Action(_), _) => "Hold up 1-5 fingers to set volume  (Q = back)",
            (Mode::Menu, Phase::AwaitingSelection) => "Hold up 1 finger (volume) or 2 fingers (option 2)",
            (Mode::Menu, Phase::Confirming(_)) => "Thumb up to confirm, thumb down to cancel",
            (Mode::Menu, Phase::ActionRunning(_)) => "Option 2 has no action  (Q = quit)",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
