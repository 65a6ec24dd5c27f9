//! Per-tick blob deformation driven by band metrics.

use glam::Vec3;
use tracing::debug;

use super::{MeshFrame, MeshMaterial, MeshTransform};
use crate::analysis::BandMetrics;
use crate::error::ConfigError;
use crate::params::MeshTuning;
use crate::smoothing::SmoothedValue;

// Oscillator frequencies (rad/s) and band phase seeds
const SCALE_PULSE_FREQ: f32 = 0.9;
const SCALE_PULSE_AMP_SEED: f32 = 4.0;
const DISTORT_SWAY_FREQ: f32 = 0.71;
const DISTORT_SWAY_HIGH_SEED: f32 = 2.2;
const SPEED_SWAY_FREQ: f32 = 0.43;
const SPEED_SWAY_LOW_SEED: f32 = 3.2;
const WOBBLE_FREQ: [f32; 3] = [0.7, 0.5, 0.33];
const WOBBLE_SEED: [f32; 3] = [2.0, 2.5, 3.0];
const BREATH_FREQ: f32 = 1.3;

/// Blob state carried across ticks
#[derive(Debug, Clone)]
pub struct MeshState {
    /// Spin accumulator (radians)
    pub phase: f32,
    pub rotation: Vec3,
    /// Tracks its target exactly while active, eases toward rest while inactive
    pub scale: SmoothedValue,
    pub distort: SmoothedValue,
    pub speed: SmoothedValue,
    pub emissive_intensity: f32,
}

/// Owns the blob state for one visualization session
pub struct MeshDeformer {
    tuning: MeshTuning,
    state: MeshState,
    was_active: bool,
}

impl MeshDeformer {
    /// Create a deformer resting at its silence baseline
    pub fn new(tuning: MeshTuning) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let state = MeshState {
            phase: 0.0,
            rotation: Vec3::ZERO,
            scale: SmoothedValue::new(1.0, tuning.scale_release_rate),
            distort: SmoothedValue::new(tuning.distort_base, tuning.distort_rate),
            speed: SmoothedValue::new(tuning.speed_base, tuning.speed_rate),
            emissive_intensity: tuning.emissive_base.max(0.0),
        };

        Ok(Self {
            tuning,
            state,
            was_active: true,
        })
    }

    pub fn state(&self) -> &MeshState {
        &self.state
    }

    pub fn tuning(&self) -> &MeshTuning {
        &self.tuning
    }

    /// Advance one tick
    ///
    /// # Arguments
    /// * `metrics` - Band metrics for this frame (all zero while inactive)
    /// * `time_s` - Elapsed session time in seconds
    /// * `is_active` - Whether the signal is playing
    pub fn update(&mut self, metrics: &BandMetrics, time_s: f32, is_active: bool) -> MeshFrame {
        let p = &self.tuning;
        let s = &mut self.state;

        let amplitude = metrics.amplitude.max(0.0);
        let low = metrics.low.max(0.0);
        let mid = metrics.mid.max(0.0);
        let high = metrics.high.max(0.0);

        if is_active != self.was_active {
            debug!(is_active, "blob signal state changed");
            self.was_active = is_active;
        }

        // Treble accelerates the spin
        s.phase += p.phase_step + high * p.phase_high_gain;

        let scale_target = (1.0
            + amplitude.sqrt() * p.scale_amplitude_gain
            + low.powf(1.5) * p.scale_low_gain
            + p.scale_pulse * (time_s * SCALE_PULSE_FREQ + amplitude * SCALE_PULSE_AMP_SEED).sin())
        .max(p.scale_floor);
        if is_active {
            s.scale.snap(scale_target);
        } else {
            s.scale.step(scale_target);
        }

        let distort_target = p.distort_base
            + mid.powf(p.distort_mid_exponent) * p.distort_mid_gain
            + low * p.distort_low_gain
            + p.distort_sway * (time_s * DISTORT_SWAY_FREQ + high * DISTORT_SWAY_HIGH_SEED).sin();
        s.distort.step(distort_target);
        let distort = s.distort.clamp_current(p.distort_range.0, p.distort_range.1);

        let speed = if is_active {
            let speed_target = p.speed_base
                + high.powf(p.speed_high_exponent) * p.speed_high_gain
                + mid * p.speed_mid_gain
                + p.speed_sway * (time_s * SPEED_SWAY_FREQ + low * SPEED_SWAY_LOW_SEED).sin();
            s.speed.step(speed_target);
            s.speed.clamp_current(p.speed_range.0, p.speed_range.1)
        } else {
            // Stop the running motion now; everything else eases down
            s.speed.snap(p.rest_speed);
            p.rest_speed
        };

        let wobble = |axis: usize, band: f32| {
            p.wobble_amplitude[axis] * (time_s * WOBBLE_FREQ[axis] + band * WOBBLE_SEED[axis]).sin()
        };
        s.rotation = Vec3::new(
            s.phase * p.rotation_rate_x + wobble(0, mid),
            s.phase * p.rotation_rate_y + wobble(1, high),
            wobble(2, low),
        );

        s.emissive_intensity = (p.emissive_base
            + amplitude * p.emissive_amplitude_gain
            + high * p.emissive_high_gain
            + p.emissive_breath * (time_s * BREATH_FREQ).sin())
        .max(0.0);

        MeshFrame {
            transform: MeshTransform {
                rotation: s.rotation,
                scale: s.scale.current().max(p.scale_floor),
            },
            material: MeshMaterial {
                distort,
                speed,
                emissive_intensity: s.emissive_intensity,
            },
        }
    }
}
