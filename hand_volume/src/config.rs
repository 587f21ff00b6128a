//! Runtime configuration and command-line flags.

use std::path::PathBuf;

use clap::Parser;
use hold_menu::Timing;

/// MediaPipe wrapper shipped with this crate.
pub const DEFAULT_DETECTOR_SCRIPT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/hand_detect.py");

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.  Gesture thresholds are not
/// configurable: `timing` is always [`Timing::default`].
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// OpenCV camera device index (camera builds only).
    pub camera_index:       i32,
    pub timing:             Timing,
    /// Log volume changes instead of touching the system mixer.
    pub dry_run:            bool,
    /// Consecutive bad frames tolerated before the loop gives up.
    pub max_frame_failures: u32,
    /// MediaPipe wrapper script and the interpreter that runs it.
    pub detector_script:    PathBuf,
    pub detector_python:    String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            camera_index:       0,
            timing:             Timing::default(),
            dry_run:            false,
            max_frame_failures: 30,
            detector_script:    PathBuf::from(DEFAULT_DETECTOR_SCRIPT),
            detector_python:    "python3".to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Cli
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Parser)]
#[command(name = "hand_volume", version)]
#[command(about = "Hand-gesture menu and system volume controller")]
pub struct Cli {
    /// Camera device index
    #[arg(long, default_value_t = 0)]
    pub camera: i32,

    /// Log volume changes without touching the system mixer
    #[arg(long)]
    pub dry_run: bool,

    /// Consecutive bad frames tolerated before giving up
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_frame_failures: u32,

    /// Log filter, e.g. `debug` or `hold_menu=debug` (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// MediaPipe detector script
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DETECTOR_SCRIPT)]
    pub detector: PathBuf,

    /// Python interpreter for the detector script
    #[arg(long, default_value = "python3")]
    pub python: String,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            camera_index:       self.camera,
            timing:             Timing::default(),
            dry_run:            self.dry_run,
            max_frame_failures: self.max_frame_failures,
            detector_script:    self.detector,
            detector_python:    self.python,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
