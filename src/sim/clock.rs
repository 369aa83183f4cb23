//! Fixed-rate clock
//!
//! Turns variable host frame times into whole simulation ticks. Physics never
//! sees the frame time itself, only the number of ticks to run.

use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS};

/// Accumulates frame time and hands out fixed ticks
#[derive(Debug, Clone)]
pub struct FixedClock {
    tick_secs: f32,
    accumulator: f32,
}

impl FixedClock {
    pub fn new(tick_rate: u32) -> Self {
        assert!(tick_rate > 0, "tick rate must be positive");
        Self {
            tick_secs: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    /// Add `elapsed` seconds and return how many ticks to run now.
    ///
    /// Long frames are clamped and at most `MAX_SUBSTEPS` ticks are returned,
    /// dropping the backlog instead of spiralling.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DELTA);

        let mut ticks = 0;
        while self.accumulator >= self.tick_secs && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.tick_secs;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.tick_secs);
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick_secs
    }
}
