//! Spawn cadence, flight and recycling for the star stream.

use tracing::{debug, trace};

use super::pool::{Particle, ParticlePool};
use super::StarFrame;
use crate::error::ConfigError;
use crate::params::StarFieldTuning;
use crate::random::RandomSource;

/// Drives the particle pool from amplitude and spectral centroid
pub struct ParticleDirector<R = fastrand::Rng> {
    tuning: StarFieldTuning,
    pool: ParticlePool,
    spawn_accumulator: f32,
    rng: R,
    /// Whether the last tick hit a full pool (for transition logging)
    saturated: bool,
}

impl ParticleDirector<fastrand::Rng> {
    /// Create a director with an entropy-seeded generator
    pub fn new(tuning: StarFieldTuning) -> Result<Self, ConfigError> {
        Self::with_rng(tuning, fastrand::Rng::new())
    }

    /// Create a director whose jitter is reproducible from `seed`
    pub fn with_seed(tuning: StarFieldTuning, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(tuning, fastrand::Rng::with_seed(seed))
    }
}

impl<R: RandomSource> ParticleDirector<R> {
    /// Create a director and pre-spawn the initial batch
    ///
    /// The initial batch flies at `initial_speed` so the field is populated
    /// before the first audio tick.
    pub fn with_rng(tuning: StarFieldTuning, rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut director = Self {
            pool: ParticlePool::with_capacity(tuning.capacity),
            tuning,
            spawn_accumulator: 0.0,
            rng,
            saturated: false,
        };

        let initial_speed = director.tuning.initial_speed;
        for _ in 0..director.tuning.initial_count {
            if !director.spawn(initial_speed) {
                break;
            }
        }

        debug!(
            capacity = director.pool.capacity(),
            seeded = director.pool.active_count(),
            "star field created"
        );
        Ok(director)
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn tuning(&self) -> &StarFieldTuning {
        &self.tuning
    }

    /// Fractional spawns carried into the next tick
    pub fn spawn_accumulator(&self) -> f32 {
        self.spawn_accumulator
    }

    /// Advance one tick
    ///
    /// # Arguments
    /// * `amplitude` - Overall level in [0, 1]
    /// * `centroid` - Normalized spectral centroid in [0, 1]
    /// * `dt_s` - Seconds since the previous tick (clamped to `max_dt_s`)
    pub fn update(&mut self, amplitude: f32, centroid: f32, dt_s: f32) -> StarFrame {
        let dt = if dt_s.is_finite() {
            dt_s.clamp(0.0, self.tuning.max_dt_s)
        } else {
            0.0
        };
        let centroid = centroid.clamp(0.0, 1.0);

        // Brighter spectra stream faster and denser
        let speed = self.tuning.target_speed(centroid);
        let spawn_rate = self.tuning.spawn_rate(centroid);

        self.spawn_accumulator += dt * spawn_rate;
        let mut spawned = 0;
        let mut dropped = 0;
        while self.spawn_accumulator >= 1.0 {
            if self.spawn(speed) {
                spawned += 1;
            } else {
                dropped += 1;
            }
            self.spawn_accumulator -= 1.0;
        }

        for particle in self.pool.live_mut() {
            particle.position[2] += particle.velocity * dt;
        }

        let recycle_depth = self.tuning.recycle_depth;
        let recycled = self
            .pool
            .recycle_where(|particle| particle.position[2] > recycle_depth);

        let saturated = dropped > 0;
        if saturated != self.saturated {
            debug!(
                active = self.pool.active_count(),
                "star pool {}",
                if saturated { "full, dropping spawns" } else { "has room again" }
            );
            self.saturated = saturated;
        }
        trace!(spawned, dropped, recycled, active = self.pool.active_count(), "stars tick");

        let opacity = (self.tuning.opacity_base + amplitude * self.tuning.opacity_amplitude_gain)
            .clamp(0.0, 1.0);

        StarFrame {
            opacity,
            active_count: self.pool.active_count(),
            spawned,
            dropped,
            recycled,
        }
    }

    /// Spawn one particle on the far slab; `false` when the pool is full
    fn spawn(&mut self, speed: f32) -> bool {
        if self.pool.is_full() {
            return false;
        }

        let half = self.tuning.lateral_half_extent;
        let (jitter_min, jitter_max) = self.tuning.velocity_jitter;
        let particle = Particle {
            position: [
                self.rng.range(-half, half),
                self.rng.range(-half, half),
                self.tuning.spawn_depth - self.rng.next_unit() * self.tuning.spawn_depth_jitter,
            ],
            velocity: speed * self.rng.range(jitter_min, jitter_max),
        };
        self.pool.push(particle)
    }
}
