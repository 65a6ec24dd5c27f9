//! Blobwave library - audio-reactive blob and star field animation

pub mod analysis;
pub mod audio;
pub mod blob;
pub mod cli;
pub mod clock;
pub mod engine;
pub mod error;
pub mod logging;
pub mod params;
pub mod random;
pub mod smoothing;
pub mod stars;

pub use analysis::{BandAnalyzer, BandMetrics};
pub use engine::{EngineConfig, Frame, FrameExchange, VisualizerEngine};
pub use error::{AudioError, ConfigError};
