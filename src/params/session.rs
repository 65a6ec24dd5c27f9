//! Run-loop configuration for the demo driver.

use crate::error::ConfigError;

/// Frame pacing and duration of a visualization session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Target frame rate (FPS)
    pub fps: u32,

    /// Session length (seconds)
    pub duration_secs: f32,

    /// Time at which the signal goes inactive (seconds), if any
    pub pause_at_secs: Option<f32>,

    /// Seed for particle jitter; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            duration_secs: 10.0,
            pause_at_secs: None,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Fixed frame interval (seconds)
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Total number of frames to run
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Whether the signal should be active at `elapsed_s`
    pub fn is_active_at(&self, elapsed_s: f32) -> bool {
        self.pause_at_secs.map_or(true, |pause| elapsed_s < pause)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        super::check_positive("fps", self.fps as f32)?;
        super::check_positive("duration", self.duration_secs)
    }
}
