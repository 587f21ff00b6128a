//! # hold_menu
//!
//! A gesture menu where every decision is a signal *held still* for a fixed
//! time.  No IO happens here: callers pass in the hands seen this frame and
//! the frame's timestamp, and get back a list of [`Effect`]s to carry out.
//!
//! ## Flow
//!
//! ```text
//!   AwaitingSelection ──(1 or 2 fingers, held 5 s)──▶ Confirming(option)
//!          ▲                                               │
//!          │◀──────────(thumb down, held 5 s)──────────────┤
//!          │                                               │ (thumb up, held 5 s)
//!          │                                               ▼
//!          └──(volume set + 2 s pause, or Q)──── ActionRunning(option)
//! ```
//!
//! Option 1 runs the [`VolumeAction`]: hold 1–5 fingers for 5 s to set the
//! system volume to 0 / 25 / 50 / 75 / 100 %.  Option 2 has no action and
//! stays in `ActionRunning` until the user quits.

pub mod timing;
pub mod hold;
pub mod message;
pub mod fps;
pub mod menu;
pub mod volume;
pub mod controller;

pub use timing::Timing;
pub use hold::{Hold, HoldTimer};
pub use message::MessageBoard;
pub use fps::FpsCounter;
pub use menu::{MenuEvent, MenuMachine, MenuOption, Phase};
pub use volume::{ActionStep, VolumeAction, VolumeLevel};
pub use controller::{Controller, Effect, Overlay};
