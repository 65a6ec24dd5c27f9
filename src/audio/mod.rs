//! Spectrum sources feeding the visualizer.
//!
//! The engine only needs a byte spectrum and an "is playing" flag per
//! frame. Sources range from fixed fixtures to Glicol synthesis analysed
//! offline or played live through the default output device.

mod fft;
mod spectrum;
mod synthesis;
mod system;

// Re-export public types
pub use spectrum::SpectrumAnalyser;
pub use synthesis::{SynthSpectrum, GLICOL_COMPOSITION};
pub use system::AudioSystem;

/// Supplies one frequency-domain snapshot per frame
pub trait SpectrumSource {
    /// Advance the source by `dt_s` seconds before reading
    fn poll(&mut self, _dt_s: f32) {}

    /// Current per-bin energies (0–255), fixed length for the session
    fn snapshot(&self) -> &[u8];

    /// Whether the signal is currently playing
    fn is_active(&self) -> bool;
}

/// Fixed spectrum with a toggleable active flag
#[derive(Debug, Clone)]
pub struct StaticSpectrum {
    bins: Vec<u8>,
    active: bool,
}

impl StaticSpectrum {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins, active: true }
    }

    /// All-zero spectrum of `len` bins
    pub fn silence(len: usize) -> Self {
        Self::new(vec![0; len])
    }

    /// Full-scale spectrum of `len` bins
    pub fn saturated(len: usize) -> Self {
        Self::new(vec![255; len])
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn set_bins(&mut self, bins: &[u8]) {
        self.bins.clear();
        self.bins.extend_from_slice(bins);
    }
}

impl SpectrumSource for StaticSpectrum {
    fn snapshot(&self) -> &[u8] {
        &self.bins
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
