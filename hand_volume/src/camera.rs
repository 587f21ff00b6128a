//! Webcam landmark source (feature `camera`).
//!
//! Frames come from OpenCV's `VideoCapture`.  Hand landmarks come from a
//! MediaPipe wrapper script running as a child process: each frame is written
//! to its stdin as a little-endian `(width, height, channels)` header followed
//! by the raw BGR bytes, and it answers with one JSON line
//!
//! ```text
//! {"hands": [{"handedness": "Right", "score": 0.97,
//!             "landmarks": [{"x": 0.51, "y": 0.62, "z": -0.01}, ...]}]}
//! ```
//!
//! The script prints `READY` once its model is loaded.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use hand_pose::{HandLandmarks, Point};
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::source::{Frame, Image, LandmarkSource, SourceError};

// ════════════════════════════════════════════════════════════════════════════
// Detector protocol
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct LandmarkReply {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct HandReply {
    #[serde(default)]
    handedness: String,
    #[serde(default)]
    score:      f32,
    landmarks:  Vec<LandmarkReply>,
}

#[derive(Debug, Deserialize)]
struct DetectionReply {
    hands: Vec<HandReply>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one detector answer.  Hands with the wrong number of landmarks are
/// dropped with a warning; a reported error fails just this frame.
fn parse_reply(line: &str) -> Result<Vec<HandLandmarks>, SourceError> {
    let reply: DetectionReply = serde_json::from_str(line)
        .map_err(|e| SourceError::Frame(format!("unreadable detector reply: {}", e)))?;
    if let Some(error) = reply.error {
        return Err(SourceError::Frame(format!("detector: {}", error)));
    }

    let mut hands = Vec::with_capacity(reply.hands.len());
    for hand in reply.hands {
        let points: Vec<Point> = hand.landmarks.iter().map(|l| Point::new(l.x, l.y)).collect();
        match HandLandmarks::from_points(&points) {
            Ok(lm) => {
                debug!(handedness = %hand.handedness, score = hand.score, "hand detected");
                hands.push(lm);
            }
            Err(e) => warn!(error = %e, "ignoring malformed hand"),
        }
    }
    Ok(hands)
}

// ════════════════════════════════════════════════════════════════════════════
// HandDetector (MediaPipe subprocess)
// ════════════════════════════════════════════════════════════════════════════

struct HandDetector {
    process: Child,
    stdin:   ChildStdin,
    stdout:  BufReader<ChildStdout>,
}

impl HandDetector {
    fn spawn(python: &str, script: &Path) -> Result<Self, SourceError> {
        if !script.exists() {
            return Err(SourceError::DetectorUnavailable(format!("script not found at {}", script.display())));
        }
        info!(python, script = %script.display(), "starting MediaPipe hand detector");

        let mut process = Command::new(python)
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SourceError::DetectorUnavailable(format!("could not run {}: {}", python, e)))?;

        let (Some(stdin), Some(stdout)) = (process.stdin.take(), process.stdout.take()) else {
            let _ = process.kill();
            return Err(SourceError::DetectorUnavailable("detector pipes unavailable".into()));
        };
        let mut detector = HandDetector { process, stdin, stdout: BufReader::new(stdout) };

        let ready = detector.read_line()?;
        if ready.trim() != "READY" {
            return Err(SourceError::DetectorUnavailable(format!("expected READY, got {:?}", ready.trim())));
        }
        info!("hand detector ready");
        Ok(detector)
    }

    fn read_line(&mut self) -> Result<String, SourceError> {
        let mut line = String::new();
        let n = self.stdout
            .read_line(&mut line)
            .map_err(|e| SourceError::DetectorUnavailable(e.to_string()))?;
        if n == 0 {
            return Err(SourceError::DetectorUnavailable("detector exited".into()));
        }
        Ok(line)
    }

    fn detect(&mut self, frame: &Mat) -> Result<Vec<HandLandmarks>, SourceError> {
        let data = frame.data_bytes().map_err(frame_error)?;
        let header = [frame.cols() as u32, frame.rows() as u32, frame.channels() as u32];

        // A broken pipe means the child is gone.
        let io_lost = |e: std::io::Error| SourceError::DetectorUnavailable(e.to_string());
        for word in header {
            self.stdin.write_all(&word.to_le_bytes()).map_err(io_lost)?;
        }
        self.stdin.write_all(data).map_err(io_lost)?;
        self.stdin.flush().map_err(io_lost)?;

        let line = self.read_line()?;
        parse_reply(&line)
    }
}

impl Drop for HandDetector {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraSource
// ════════════════════════════════════════════════════════════════════════════

pub struct CameraSource {
    capture:  VideoCapture,
    detector: HandDetector,
}

impl CameraSource {
    pub fn open(index: i32, python: &str, script: &Path) -> Result<Self, SourceError> {
        info!(index, "opening camera");
        let unavailable = |reason: String| SourceError::CameraUnavailable { index, reason };

        let capture = VideoCapture::new(index, videoio::CAP_ANY).map_err(|e| unavailable(e.to_string()))?;
        if !capture.is_opened().map_err(|e| unavailable(e.to_string()))? {
            return Err(unavailable("device did not open".into()));
        }
        let detector = HandDetector::spawn(python, script)?;
        Ok(CameraSource { capture, detector })
    }
}

impl LandmarkSource for CameraSource {
    fn next_frame(&mut self) -> Result<Frame, SourceError> {
        let mut mat = Mat::default();
        let grabbed = self.capture.read(&mut mat).map_err(frame_error)?;
        if !grabbed || mat.empty() {
            return Err(SourceError::Frame("camera returned no picture".into()));
        }
        let hands = self.detector.detect(&mat)?;
        let image = mat_to_image(&mat)?;
        Ok(Frame { image: Some(image), hands })
    }

    fn name(&self) -> &'static str {
        "camera"
    }
}

fn frame_error(e: opencv::Error) -> SourceError {
    SourceError::Frame(e.to_string())
}

/// Repack a continuous 8-bit BGR `Mat` as `0xFFRRGGBB` pixels.
fn mat_to_image(mat: &Mat) -> Result<Image, SourceError> {
    if mat.channels() != 3 {
        return Err(SourceError::Frame(format!("expected 3 channels, got {}", mat.channels())));
    }
    let bytes = mat.data_bytes().map_err(frame_error)?;
    Ok(Image {
        width:  mat.cols() as usize,
        height: mat.rows() as usize,
        pixels: bgr_to_argb(bytes),
    })
}

fn bgr_to_argb(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(3)
        .map(|bgr| 0xFF00_0000 | (bgr[2] as u32) << 16 | (bgr[1] as u32) << 8 | bgr[0] as u32)
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
