//! Procedural music synthesis and an offline spectrum source built on it.

use glicol::Engine;
use tracing::debug;

use super::spectrum::SpectrumAnalyser;
use super::SpectrumSource;
use crate::error::AudioError;
use crate::params::{audio_constants::BLOCK_SIZE, AnalyserConfig};

/// Glicol composition (procedural music code)
///
/// An octave-hopping saw lead through a sweeping low-pass, so energy moves
/// between the low, mid and high bands as the filter opens and closes.
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 4.0 >> seq 48 _48 _~n 55
~n: choose 60 67 72 79 84 0 0
~amp: ~gate >> envperc 0.002 0.2
~pit: ~gate >> mul 261.63
~lead: saw ~pit >> mul ~amp >> lpf ~sweep 3.0 >> mul 0.12
~sweep: sin 0.1 >> mul 2500 >> add 3000
o: ~lead >> plate 0.1
"#;

/// Build a Glicol engine running the composition at `sample_rate_hz`
pub(crate) fn build_engine(sample_rate_hz: usize) -> Result<Engine<BLOCK_SIZE>, AudioError> {
    let mut engine = Engine::<BLOCK_SIZE>::new();
    engine.set_sr(sample_rate_hz);
    engine.update_with_code(GLICOL_COMPOSITION);
    engine
        .update()
        .map_err(|e| AudioError::Synth(format!("{:?}", e)))?;
    Ok(engine)
}

/// Synthesizes the composition offline and analyses it, no device needed
///
/// Each `poll(dt)` renders `dt` seconds of audio (whole blocks, carrying
/// the remainder) so the spectrum follows the music at frame rate.
pub struct SynthSpectrum {
    engine: Engine<BLOCK_SIZE>,
    analyser: SpectrumAnalyser,
    sample_rate_hz: f32,
    /// Samples owed to the analyser but not yet rendered
    pending_samples: f32,
    block: Vec<f32>,
    active: bool,
}

impl SynthSpectrum {
    pub fn new(config: AnalyserConfig) -> Result<Self, AudioError> {
        let sample_rate_hz = config.sample_rate_hz;
        let analyser = SpectrumAnalyser::new(config)?;
        let engine = build_engine(sample_rate_hz)?;
        debug!(sample_rate_hz, "offline synth ready");

        Ok(Self {
            engine,
            analyser,
            sample_rate_hz: sample_rate_hz as f32,
            pending_samples: 0.0,
            block: Vec::with_capacity(BLOCK_SIZE),
            active: true,
        })
    }

    /// Pause or resume; a paused source renders nothing
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Render one block of the left channel into the analyser
    fn render_block(&mut self) {
        self.block.clear();
        let (buffers, _) = self.engine.next_block(vec![]);
        for i in 0..BLOCK_SIZE {
            self.block.push(buffers[0][i].clamp(-1.0, 1.0));
        }
        self.analyser.push_samples(&self.block);
    }
}

impl SpectrumSource for SynthSpectrum {
    fn poll(&mut self, dt_s: f32) {
        if !self.active {
            return;
        }

        self.pending_samples += dt_s.max(0.0) * self.sample_rate_hz;
        while self.pending_samples >= BLOCK_SIZE as f32 {
            self.render_block();
            self.pending_samples -= BLOCK_SIZE as f32;
        }
        self.analyser.analyse();
    }

    fn snapshot(&self) -> &[u8] {
        self.analyser.bytes()
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synth_spectrum_has_fixed_length() {
        let mut source = SynthSpectrum::new(AnalyserConfig::default()).unwrap();
        assert_eq!(source.snapshot().len(), 128);

        for _ in 0..30 {
            source.poll(1.0 / 60.0);
            assert_eq!(source.snapshot().len(), 128);
        }
    }

    #[test]
    fn test_paused_synth_renders_nothing() {
        let mut source = SynthSpectrum::new(AnalyserConfig::default()).unwrap();
        source.set_active(false);
        source.poll(1.0);
        assert!(!source.is_active());
        assert!(source.snapshot().iter().all(|&b| b == 0));
    }
}
