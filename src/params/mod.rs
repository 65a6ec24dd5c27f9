//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here with:
//! - Units (seconds, world units, per-tick fractions)
//! - Documented ranges and meanings
//! - A `validate()` that rejects values the per-frame code cannot honor
//!
//! The defaults are tuned for one visual scale (a 128-bin spectrum, a unit
//! blob and a star tunnel around the origin); they are configuration, not
//! protocol.

mod analysis;
mod blob;
mod session;
mod stars;

// Re-export all types
pub use analysis::{audio_constants, AnalyserConfig, BandSplit};
pub use blob::MeshTuning;
pub use session::SessionConfig;
pub use stars::StarFieldTuning;

use crate::error::ConfigError;

/// Check that a smoothing rate lies in (0, 1]
pub(crate) fn check_rate(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

/// Check that `min < max` (and that neither is NaN)
pub(crate) fn check_range(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min < max {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { name, min, max })
    }
}

/// Check that a value is strictly positive and finite
pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Check that a value is zero or positive, and finite
pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
