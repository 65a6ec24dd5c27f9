//! Byte spectrum analyser over a sliding PCM window.
//!
//! Mirrors the classic browser analyser pipeline: Blackman window, FFT,
//! magnitude / N, exponential smoothing across analyses, decibels, then a
//! linear map of `[min_db, max_db]` onto 0–255.

use std::collections::VecDeque;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::fft::blackman_window;
use crate::error::ConfigError;
use crate::params::AnalyserConfig;

pub struct SpectrumAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    /// Most recent `fft_size` samples, oldest first
    history: VecDeque<f32>,
    /// Pre-allocated FFT buffer to avoid allocation in analyse()
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl SpectrumAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let size = config.fft_size;
        let fft = FftPlanner::new().plan_fft_forward(size);
        let window = (0..size).map(|i| blackman_window(i, size)).collect();
        let bins = config.bin_count();

        Ok(Self {
            fft,
            window,
            history: VecDeque::from(vec![0.0; size]),
            buffer: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; bins],
            bytes: vec![0; bins],
            config,
        })
    }

    pub fn bin_count(&self) -> usize {
        self.bytes.len()
    }

    /// Append mono samples, keeping only the latest window
    pub fn push_samples(&mut self, samples: &[f32]) {
        let size = self.config.fft_size;
        let fresh = &samples[samples.len().saturating_sub(size)..];
        for &sample in fresh {
            if self.history.len() == size {
                self.history.pop_front();
            }
            self.history.push_back(if sample.is_finite() { sample } else { 0.0 });
        }
    }

    /// Analyse the current window and return the byte spectrum
    pub fn analyse(&mut self) -> &[u8] {
        for ((slot, &sample), &w) in self
            .buffer
            .iter_mut()
            .zip(self.history.iter())
            .zip(self.window.iter())
        {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.buffer);

        let size = self.config.fft_size as f32;
        let tau = self.config.smoothing;
        let db_span = self.config.max_db - self.config.min_db;

        for (k, (smoothed, byte)) in self
            .smoothed
            .iter_mut()
            .zip(self.bytes.iter_mut())
            .enumerate()
        {
            let magnitude = self.buffer[k].norm() / size;
            let next = tau * *smoothed + (1.0 - tau) * magnitude;
            *smoothed = if next.is_finite() { next } else { 0.0 };

            let db = 20.0 * smoothed.log10();
            let scaled = 255.0 * (db - self.config.min_db) / db_span;
            *byte = if scaled.is_nan() {
                0
            } else {
                scaled.clamp(0.0, 255.0) as u8
            };
        }

        &self.bytes
    }

    /// Last computed byte spectrum
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Forget smoothing state and buffered samples
    pub fn reset(&mut self) {
        self.history.iter_mut().for_each(|s| *s = 0.0);
        self.smoothed.iter_mut().for_each(|s| *s = 0.0);
        self.bytes.iter_mut().for_each(|b| *b = 0);
    }
}
