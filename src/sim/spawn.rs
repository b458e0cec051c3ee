//! Randomized spawn timers
//!
//! Each independent spawner waits a delay drawn uniformly from its range,
//! fires, and draws a fresh delay.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::DelayRange;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed_ms: f32,
    pub next_delay_ms: f32,
    pub range: DelayRange,
}

impl SpawnTimer {
    pub fn new<R: Rng + ?Sized>(range: DelayRange, rng: &mut R) -> Self {
        Self {
            elapsed_ms: 0.0,
            next_delay_ms: draw_delay(range, rng),
            range,
        }
    }

    /// Accumulate elapsed time. Returns true when the timer fires; the
    /// accumulator then restarts from zero with a newly drawn delay.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt_ms: f32, rng: &mut R) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < self.next_delay_ms {
            return false;
        }
        self.elapsed_ms = 0.0;
        self.next_delay_ms = draw_delay(self.range, rng);
        true
    }
}

/// Uniform draw from `[min_ms, max_ms]`
pub fn draw_delay<R: Rng + ?Sized>(range: DelayRange, rng: &mut R) -> f32 {
    if range.max_ms <= range.min_ms {
        return range.min_ms;
    }
    rng.random_range(range.min_ms..=range.max_ms)
}
