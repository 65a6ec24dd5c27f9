//! Spectrum analysis configuration and constants.

use std::ops::Range;

use crate::error::ConfigError;

/// Fractional cut points dividing a spectrum into low/mid/high bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSplit {
    /// End of the low band as a fraction of the bin count
    /// Default: 0.15 (first 15% of bins)
    pub low_end: f32,

    /// End of the mid band as a fraction of the bin count
    /// Default: 0.60 (mid covers 15%..60%, high the remaining 40%)
    pub mid_end: f32,
}

impl Default for BandSplit {
    fn default() -> Self {
        Self {
            low_end: 0.15,
            mid_end: 0.6,
        }
    }
}

impl BandSplit {
    /// Bin ranges `(low, mid, high)` for a spectrum of `len` bins
    ///
    /// Cut points are floored, so small spectra can produce empty bands.
    pub fn ranges(&self, len: usize) -> (Range<usize>, Range<usize>, Range<usize>) {
        let low_end = ((len as f32 * self.low_end) as usize).min(len);
        let mid_end = ((len as f32 * self.mid_end) as usize).clamp(low_end, len);
        (0..low_end, low_end..mid_end, mid_end..len)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low_end >= 0.0 && self.low_end < self.mid_end && self.mid_end <= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidBandSplit {
                low: self.low_end,
                mid: self.mid_end,
            })
        }
    }
}

/// FFT analyser configuration producing byte spectra from PCM
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Audio sample rate (Hz)
    pub sample_rate_hz: usize,

    /// FFT window size (must be power of 2); yields `fft_size / 2` bins
    /// Default: 256 (= 128 bins)
    pub fft_size: usize,

    /// Time smoothing between successive analyses, in [0, 1)
    /// Default: 0.8
    pub smoothing: f32,

    /// Level mapped to byte 0 (dBFS)
    pub min_db: f32,

    /// Level mapped to byte 255 (dBFS)
    pub max_db: f32,

    /// Analysis interval for the live analysis thread (milliseconds)
    /// Default: 16 (one analysis per 60 Hz frame)
    pub update_interval_ms: u64,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            fft_size: 256,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            update_interval_ms: 16,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins in each snapshot
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(ConfigError::InvalidFftSize(self.fft_size));
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::NotPositive {
                name: "sample rate",
                value: 0.0,
            });
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::InvalidRate {
                name: "analyser smoothing",
                value: self.smoothing,
            });
        }
        super::check_range("decibel", self.min_db, self.max_db)
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 samples = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_split_ranges_for_128_bins() {
        let (low, mid, high) = BandSplit::default().ranges(128);

        // floor(128 * 0.15) = 19, floor(128 * 0.6) = 76
        assert_eq!(low, 0..19);
        assert_eq!(mid, 19..76);
        assert_eq!(high, 76..128);
    }

    #[test]
    fn test_band_split_ranges_tiny_spectra() {
        let split = BandSplit::default();

        let (low, mid, high) = split.ranges(0);
        assert!(low.is_empty() && mid.is_empty() && high.is_empty());

        // One bin: everything lands in the high band
        let (low, mid, high) = split.ranges(1);
        assert!(low.is_empty());
        assert!(mid.is_empty());
        assert_eq!(high, 0..1);
    }

    #[test]
    fn test_band_split_validation() {
        let bad = BandSplit {
            low_end: 0.7,
            mid_end: 0.6,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_analyser_config_rejects_bad_fft_size() {
        let config = AnalyserConfig {
            fft_size: 300,
            ..AnalyserConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFftSize(300)));
        assert_eq!(AnalyserConfig::default().bin_count(), 128);
    }
}
