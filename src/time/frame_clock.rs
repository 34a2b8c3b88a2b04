use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-frame timing handed to the field updater, in seconds.
///
/// `elapsed` stays `f64` so phase math keeps sub-frame resolution after
/// long uptimes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Seconds since the clock started
    pub elapsed: f64,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// Render-loop clock
///
/// Accumulates frame durations exactly and converts to seconds on demand,
/// so `elapsed` never drifts from the sum of deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    elapsed: Duration,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame
    pub fn tick(&mut self, dt: Duration) -> FrameTime {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.frame_count = self.frame_count.wrapping_add(1);

        FrameTime {
            elapsed: self.elapsed.as_secs_f64(),
            delta: dt.as_secs_f32(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.frame_count = 0;
    }
}
