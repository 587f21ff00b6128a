//! Landmark indices, the per-hand point set, and skeleton connections.

use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices (MediaPipe hand model)
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Bone list used to draw the hand skeleton over a frame.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, RING_MCP), (RING_MCP, PINKY_MCP),
];

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    #[error("expected {expected} hand landmarks, got {got}")]
    WrongLandmarkCount { expected: usize, got: usize },
}

// ════════════════════════════════════════════════════════════════════════════
// Point / HandLandmarks
// ════════════════════════════════════════════════════════════════════════════

/// A 2-D landmark in normalised image coordinates (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// The 21 landmarks of one detected hand in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Point; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        HandLandmarks { points }
    }

    /// Build from a detector's point list, which must hold exactly 21 points.
    pub fn from_points(points: &[Point]) -> Result<Self, PoseError> {
        let points: [Point; LANDMARK_COUNT] = points.try_into().map_err(|_| {
            PoseError::WrongLandmarkCount { expected: LANDMARK_COUNT, got: points.len() }
        })?;
        Ok(HandLandmarks { points })
    }

    pub fn point(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    /// Landmark positions scaled to a `width` × `height` pixel grid.
    pub fn to_pixels(&self, width: usize, height: usize) -> [(i32, i32); LANDMARK_COUNT] {
        let mut out = [(0, 0); LANDMARK_COUNT];
        for (slot, p) in out.iter_mut().zip(self.points.iter()) {
            *slot = ((p.x * width as f32) as i32, (p.y * height as f32) as i32);
        }
        out
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
