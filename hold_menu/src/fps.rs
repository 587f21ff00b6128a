//! Frame-rate readout.

use std::time::Instant;

#[derive(Debug, Default)]
pub struct FpsCounter {
    last: Option<Instant>,
}

impl FpsCounter {
    /// Record a processed frame and return `1 / Δt` since the previous one.
    /// The first frame (and a zero Δt) reports 0.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let fps = match self.last {
            Some(prev) => {
                let dt = now.saturating_duration_since(prev).as_secs_f32();
                if dt > 0.0 { 1.0 / dt } else { 0.0 }
            }
            None => 0.0,
        };
        self.last = Some(now);
        fps
    }
}
