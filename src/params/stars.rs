//! Star field tuning: spawn cadence, particle motion and recycling.

use crate::error::ConfigError;

/// Particle stream parameters (world units, seconds)
///
/// Particles spawn on a far slab and fly toward the camera along +Z until
/// they cross the recycle plane.
#[derive(Debug, Clone)]
pub struct StarFieldTuning {
    /// Fixed pool capacity (particles)
    pub capacity: usize,

    /// Particles spawned on construction, before the first audio tick
    pub initial_count: usize,

    /// Speed used for the initial batch (units/s)
    pub initial_speed: f32,

    /// Flight speed at zero centroid (units/s)
    pub base_speed: f32,

    /// Extra speed per unit of normalized centroid
    /// Formula: speed = base_speed + centroid * speed_gain
    pub speed_gain: f32,

    /// Spawn rate at zero centroid (particles/s)
    pub base_spawn_rate: f32,

    /// Extra spawn rate per unit of normalized centroid
    pub spawn_gain: f32,

    /// Per-particle velocity jitter as (min, max) multipliers
    pub velocity_jitter: (f32, f32),

    /// Half-width of the spawn plane on X and Y
    pub lateral_half_extent: f32,

    /// Spawn depth nearest to the camera (negative Z)
    pub spawn_depth: f32,

    /// Random extra depth added behind `spawn_depth`
    pub spawn_depth_jitter: f32,

    /// Particles with Z beyond this are recycled
    pub recycle_depth: f32,

    /// Largest dt accepted per update (s); longer frames are clamped
    pub max_dt_s: f32,

    /// Base star opacity
    pub opacity_base: f32,

    /// Opacity gain per unit amplitude
    pub opacity_amplitude_gain: f32,
}

impl Default for StarFieldTuning {
    fn default() -> Self {
        Self {
            capacity: 2000,
            initial_count: 600,
            initial_speed: 80.0,
            base_speed: 50.0,
            speed_gain: 220.0,
            base_spawn_rate: 30.0,
            spawn_gain: 140.0,
            velocity_jitter: (0.8, 1.2),
            lateral_half_extent: 20.0,
            spawn_depth: -120.0,
            spawn_depth_jitter: 180.0,
            recycle_depth: 30.0,
            max_dt_s: 0.05,
            opacity_base: 0.6,
            opacity_amplitude_gain: 0.5,
        }
    }
}

impl StarFieldTuning {
    /// Flight speed for a normalized spectral centroid
    pub fn target_speed(&self, centroid: f32) -> f32 {
        self.base_speed + centroid * self.speed_gain
    }

    /// Spawn rate (particles/s) for a normalized spectral centroid
    pub fn spawn_rate(&self, centroid: f32) -> f32 {
        self.base_spawn_rate + centroid * self.spawn_gain
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        super::check_positive("max dt", self.max_dt_s)?;
        super::check_non_negative("base spawn rate", self.base_spawn_rate)?;
        super::check_non_negative("spawn gain", self.spawn_gain)?;
        super::check_range("velocity jitter", self.velocity_jitter.0, self.velocity_jitter.1)?;
        super::check_range("star depth", self.spawn_depth, self.recycle_depth)
    }
}
