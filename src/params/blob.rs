//! Blob deformation tuning: band energy → transform and material.
//!
//! Angles are radians, `t` is elapsed session time in seconds. Per-tick
//! quantities (phase step, smoothing rates) are fractions applied once per
//! display frame.

use crate::error::ConfigError;

/// Mapping from band metrics to blob transform and material parameters
#[derive(Debug, Clone)]
pub struct MeshTuning {
    // === Spin ===
    /// Phase advance per tick at zero treble (radians)
    pub phase_step: f32,

    /// Extra phase advance per tick per unit of high-band energy
    /// Formula: phase += phase_step + high * phase_high_gain
    pub phase_high_gain: f32,

    /// Rotation per unit phase on the X axis
    pub rotation_rate_x: f32,

    /// Rotation per unit phase on the Y axis
    pub rotation_rate_y: f32,

    /// Wobble amplitudes per axis (radians) driven by mid/high/low
    pub wobble_amplitude: [f32; 3],

    // === Scale ===
    /// Scale gain on sqrt(amplitude)
    pub scale_amplitude_gain: f32,

    /// Scale gain on low^1.5
    pub scale_low_gain: f32,

    /// Amplitude of the slow scale pulse
    pub scale_pulse: f32,

    /// Minimum scale (prevents mesh collapse)
    pub scale_floor: f32,

    /// Rate at which scale eases toward rest while the signal is inactive
    pub scale_release_rate: f32,

    // === Distort ===
    /// Distort at silence
    pub distort_base: f32,

    /// Gain on mid^distort_mid_exponent
    pub distort_mid_gain: f32,

    pub distort_mid_exponent: f32,

    /// Linear gain on low
    pub distort_low_gain: f32,

    /// Amplitude of the high-seeded distort sway
    pub distort_sway: f32,

    /// Smoothing rate (slow: abrupt distort is visually harsh)
    pub distort_rate: f32,

    /// Output and state range
    pub distort_range: (f32, f32),

    // === Speed ===
    /// Speed at silence
    pub speed_base: f32,

    /// Gain on high^speed_high_exponent
    pub speed_high_gain: f32,

    pub speed_high_exponent: f32,

    /// Linear gain on mid
    pub speed_mid_gain: f32,

    /// Amplitude of the low-seeded speed sway
    pub speed_sway: f32,

    /// Smoothing rate (slightly faster than distort)
    pub speed_rate: f32,

    /// Output and state range while active
    pub speed_range: (f32, f32),

    /// Speed forced while the signal is inactive (motion stops)
    pub rest_speed: f32,

    // === Emissive ===
    /// Emissive intensity at silence
    pub emissive_base: f32,

    pub emissive_amplitude_gain: f32,

    pub emissive_high_gain: f32,

    /// Amplitude of the breathing sinusoid
    pub emissive_breath: f32,
}

impl Default for MeshTuning {
    fn default() -> Self {
        Self {
            phase_step: 0.012,
            phase_high_gain: 0.024,
            rotation_rate_x: 0.6,
            rotation_rate_y: 0.4,
            wobble_amplitude: [0.2, 0.15, 0.12],

            scale_amplitude_gain: 0.28,
            scale_low_gain: 0.35,
            scale_pulse: 0.06,
            scale_floor: 0.7,
            scale_release_rate: 0.1,

            // Gains sized so full-scale mids push distort past its ceiling
            distort_base: 0.35,
            distort_mid_gain: 2.2,
            distort_mid_exponent: 1.35,
            distort_low_gain: 0.35,
            distort_sway: 0.28,
            distort_rate: 0.08,
            distort_range: (0.15, 2.5),

            // Same for speed with full-scale highs
            speed_base: 1.0,
            speed_high_gain: 5.2,
            speed_high_exponent: 1.25,
            speed_mid_gain: 1.2,
            speed_sway: 0.24,
            speed_rate: 0.1,
            speed_range: (0.7, 7.0),
            rest_speed: 0.0,

            emissive_base: 0.2,
            emissive_amplitude_gain: 0.22,
            emissive_high_gain: 0.22,
            emissive_breath: 0.1,
        }
    }
}

impl MeshTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        super::check_rate("distort", self.distort_rate)?;
        super::check_rate("speed", self.speed_rate)?;
        super::check_rate("scale release", self.scale_release_rate)?;
        super::check_range("distort", self.distort_range.0, self.distort_range.1)?;
        super::check_range("speed", self.speed_range.0, self.speed_range.1)?;
        super::check_positive("scale floor", self.scale_floor)?;
        super::check_positive("distort exponent", self.distort_mid_exponent)?;
        super::check_positive("speed exponent", self.speed_high_exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturated_targets_exceed_ceilings() {
        let t = MeshTuning::default();

        // Worst-case sway still clears the ceilings at full-scale input
        let distort_min =
            t.distort_base + t.distort_mid_gain + t.distort_low_gain - t.distort_sway;
        let speed_min = t.speed_base + t.speed_high_gain + t.speed_mid_gain - t.speed_sway;

        assert!(distort_min > t.distort_range.1);
        assert!(speed_min > t.speed_range.1);
    }

    #[test]
    fn test_distort_smoother_than_speed() {
        let t = MeshTuning::default();
        assert!(t.distort_rate < t.speed_rate);
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let t = MeshTuning {
            speed_rate: 0.0,
            ..MeshTuning::default()
        };
        assert!(t.validate().is_err());
    }
}
