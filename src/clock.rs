//! Frame timing for the update loop.

use std::time::{Duration, Instant};

/// Time inputs for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the session started (monotonic)
    pub elapsed_s: f32,
    /// Seconds since the previous tick
    pub dt_s: f32,
}

impl FrameTime {
    /// Time of frame `index` in a fixed-step run
    pub fn fixed_step(index: usize, dt_s: f32) -> Self {
        Self {
            elapsed_s: index as f32 * dt_s,
            dt_s,
        }
    }
}

/// Wall-clock frame timer
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Mark a new frame and return its timing
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let time = FrameTime {
            elapsed_s: now.duration_since(self.start).as_secs_f32(),
            dt_s: now.duration_since(self.last).as_secs_f32(),
        };
        self.last = now;
        time
    }

    /// Wall time spent since the last `tick`
    pub fn since_tick(&self) -> Duration {
        self.last.elapsed()
    }

    /// Time left in a frame of length `budget`, zero once it is overrun
    pub fn remaining(&self, budget: Duration) -> Duration {
        budget.saturating_sub(self.since_tick())
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
