//! # hand_volume
//!
//! Gesture-driven menu and system volume controller.
//!
//! Each frame a [`source::LandmarkSource`] yields the detected hands, the
//! [`hold_menu::Controller`] turns held gestures into effects, and the
//! [`visualizer::Visualizer`] draws the frame with the hand skeleton, the
//! current message, a hold-progress readout and the FPS counter.
//!
//! ## Gestures
//!
//! | Phase              | Gesture                         | Result                    |
//! |--------------------|---------------------------------|---------------------------|
//! | Awaiting selection | 1 finger held 5 s               | "Option 1 selected"       |
//! | Awaiting selection | 2 fingers held 5 s              | "Option 2 selected"       |
//! | Confirming         | thumb up held 5 s               | "Confirmed", action runs  |
//! | Confirming         | thumb down held 5 s             | "Cancelled"               |
//! | Volume control     | 1–5 fingers held 5 s            | volume 0/25/50/75/100 %   |
//!
//! ## Keyboard simulation (default build)
//!
//! | Key       | Effect                               |
//! |-----------|--------------------------------------|
//! | `0`–`5`   | number of raised fingers             |
//! | `Up`      | thumb pointing up                    |
//! | `Down`    | thumb pointing down                  |
//! | `Right`   | thumb level (no sign)                |
//! | `H`       | hide / show the hand                 |
//! | `Q`       | leave volume control, or quit        |
//!
//! Build with `--features camera` to read a webcam through OpenCV and a
//! MediaPipe detector subprocess instead.

pub mod app;
pub mod audio;
pub mod canvas;
pub mod config;
pub mod error;
pub mod source;
pub mod visualizer;

#[cfg(feature = "camera")]
pub mod camera;
