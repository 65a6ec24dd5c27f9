//! Error types for configuration and audio setup.
//!
//! The per-frame core is total: analysis, deformation and particle updates
//! never fail. Errors only surface while building a session.

use thiserror::Error;

/// Invalid tuning or analysis parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} smoothing rate must be in (0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    #[error("band split must satisfy 0 <= low < mid <= 1, got low={low} mid={mid}")]
    InvalidBandSplit { low: f32, mid: f32 },

    #[error("{name} range is empty: min={min} max={max}")]
    EmptyRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("FFT size must be a power of 2 and at least 32, got {0}")]
    InvalidFftSize(usize),

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite and >= 0, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("particle capacity must be > 0")]
    ZeroCapacity,
}

/// Failures while setting up synthesis or the audio device
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("invalid analysis config: {0}")]
    Config(#[from] ConfigError),

    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("failed to get audio config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("failed to pause audio stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),

    #[error("synth engine init failed: {0}")]
    Synth(String),
}
