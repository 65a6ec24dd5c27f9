//! Per-frame wiring: spectrum → band metrics → blob + star field.
//!
//! Everything here runs synchronously inside one tick. The engine owns all
//! mutable state; the only values crossing component boundaries are the
//! read-only `BandMetrics` of the current frame.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::analysis::{BandAnalyzer, BandMetrics};
use crate::audio::SpectrumSource;
use crate::blob::{MeshDeformer, MeshFrame, MeshUniforms};
use crate::clock::FrameTime;
use crate::error::ConfigError;
use crate::params::{BandSplit, MeshTuning, StarFieldTuning};
use crate::random::RandomSource;
use crate::stars::{ParticleDirector, ParticlePool, StarFrame};

/// Tuning for every stage of the engine
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub bands: BandSplit,
    pub mesh: MeshTuning,
    pub stars: StarFieldTuning,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands.validate()?;
        self.mesh.validate()?;
        self.stars.validate()
    }
}

/// Complete output of one tick, owned so it can be handed to a renderer
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub time: FrameTime,
    pub is_active: bool,
    pub metrics: BandMetrics,
    pub mesh: MeshFrame,
    pub stars: StarFrame,
    /// Positions of the live particles, `stars.active_count` entries
    pub star_positions: Vec<[f32; 3]>,
}

impl Frame {
    pub fn mesh_uniforms(&self) -> MeshUniforms {
        MeshUniforms::new(&self.mesh, self.time.elapsed_s)
    }
}

/// Audio-reactive visualization state for one session
pub struct VisualizerEngine<R = fastrand::Rng> {
    analyzer: BandAnalyzer,
    deformer: MeshDeformer,
    director: ParticleDirector<R>,
    back: Frame,
}

impl VisualizerEngine<fastrand::Rng> {
    /// Create an engine; `seed` makes star jitter reproducible
    pub fn new(config: EngineConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self::with_rng(config, rng)
    }

    /// Shorthand for an engine with default tuning
    pub fn with_defaults(seed: Option<u64>) -> Result<Self, ConfigError> {
        Self::new(EngineConfig::default(), seed)
    }
}

impl<R: RandomSource> VisualizerEngine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let capacity = config.stars.capacity;
        let engine = Self {
            analyzer: BandAnalyzer::new(config.bands),
            deformer: MeshDeformer::new(config.mesh)?,
            director: ParticleDirector::with_rng(config.stars, rng)?,
            back: Frame {
                star_positions: Vec::with_capacity(capacity),
                ..Frame::default()
            },
        };

        info!(
            star_capacity = capacity,
            seeded_stars = engine.director.pool().active_count(),
            "visualizer session started"
        );
        Ok(engine)
    }

    /// Run one tick and return the frame just computed
    pub fn tick(&mut self, snapshot: &[u8], is_active: bool, time: FrameTime) -> &Frame {
        let metrics = self.analyzer.analyze(snapshot, is_active);
        let mesh = self.deformer.update(&metrics, time.elapsed_s, is_active);
        let stars = self
            .director
            .update(metrics.amplitude, metrics.centroid, time.dt_s);

        let frame = &mut self.back;
        frame.time = time;
        frame.is_active = is_active;
        frame.metrics = metrics;
        frame.mesh = mesh;
        frame.stars = stars;
        frame.star_positions.clear();
        frame
            .star_positions
            .extend(self.director.pool().live().iter().map(|p| p.position));

        &self.back
    }

    /// Poll `source` and run one tick from its current snapshot
    pub fn drive(&mut self, source: &mut dyn SpectrumSource, time: FrameTime) -> &Frame {
        source.poll(time.dt_s);
        let is_active = source.is_active();
        self.tick(source.snapshot(), is_active, time)
    }

    /// Hand the latest frame to the renderer side
    ///
    /// The back buffer is swapped with the shared front, so the next tick
    /// reuses the previous front's allocation.
    pub fn publish(&mut self, exchange: &FrameExchange) {
        exchange.swap(&mut self.back);
    }

    /// Back buffer: the frame from the last `tick`, or after `publish` the
    /// previous front frame
    pub fn frame(&self) -> &Frame {
        &self.back
    }

    pub fn deformer(&self) -> &MeshDeformer {
        &self.deformer
    }

    pub fn stars(&self) -> &ParticlePool {
        self.director.pool()
    }

    pub fn director(&self) -> &ParticleDirector<R> {
        &self.director
    }
}

/// Double buffer between the update loop and a renderer thread
///
/// The renderer always sees a complete frame; the update loop computes the
/// next one in its own back buffer and swaps it in.
#[derive(Clone, Default)]
pub struct FrameExchange {
    front: Arc<Mutex<Frame>>,
}

impl FrameExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap `back` with the front buffer
    fn swap(&self, back: &mut Frame) {
        let mut front = self.front.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::swap(&mut *front, back);
    }

    /// Read the front frame without copying it
    pub fn read<T>(&self, f: impl FnOnce(&Frame) -> T) -> T {
        let front = self.front.lock().unwrap_or_else(PoisonError::into_inner);
        f(&front)
    }

    /// Copy of the front frame
    pub fn snapshot(&self) -> Frame {
        self.read(Frame::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::StaticSpectrum;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_engine() -> VisualizerEngine {
        let config = EngineConfig {
            stars: StarFieldTuning {
                initial_count: 0,
                ..StarFieldTuning::default()
            },
            ..EngineConfig::default()
        };
        VisualizerEngine::new(config, Some(1)).unwrap()
    }

    #[test]
    fn test_silence_scenario() {
        let mut engine = quiet_engine();
        let silence = [0u8; 128];
        let mut spawned = 0;

        for i in 0..600 {
            let frame = engine.tick(&silence, true, FrameTime::fixed_step(i, 0.05));
            assert_eq!(frame.metrics, BandMetrics::ZERO);
            spawned += frame.stars.spawned;
        }

        // 30 seconds at the 30/s base rate
        assert_eq!(spawned, 900);
        let state = engine.deformer().state();
        assert!((state.distort.current() - 0.35).abs() <= 0.29);
        assert!((state.speed.current() - 1.0).abs() <= 0.25);
        // Base speed 50 with ±20% jitter
        assert!(engine
            .stars()
            .live()
            .iter()
            .all(|p| (39.9..=60.1).contains(&p.velocity)));
    }

    #[test]
    fn test_saturation_scenario() {
        let mut engine = quiet_engine();
        let loud = [255u8; 128];

        let mut frame = Frame::default();
        for i in 0..300 {
            frame = engine.tick(&loud, true, FrameTime::fixed_step(i, DT)).clone();
        }

        assert_eq!(frame.metrics.amplitude, 1.0);
        assert_eq!(frame.mesh.material.distort, 2.5);
        assert_eq!(frame.mesh.material.speed, 7.0);
        assert_eq!(frame.stars.opacity, 1.0);
    }

    #[test]
    fn test_positions_match_live_particles() {
        let mut engine = VisualizerEngine::with_defaults(Some(8)).unwrap();
        let snapshot: Vec<u8> = (0..128).map(|i| (i * 2) as u8).collect();

        for i in 0..120 {
            let frame = engine.tick(&snapshot, true, FrameTime::fixed_step(i, DT));
            assert_eq!(frame.star_positions.len(), frame.stars.active_count);
        }

        let live: Vec<[f32; 3]> = engine.stars().live().iter().map(|p| p.position).collect();
        assert_eq!(engine.frame().star_positions, live);
    }

    #[test]
    fn test_drive_from_source() {
        let mut engine = quiet_engine();
        let mut source = StaticSpectrum::new(vec![255; 128]);

        let frame = engine.drive(&mut source, FrameTime::fixed_step(0, DT));
        assert!(frame.is_active);
        assert_eq!(frame.metrics.high, 1.0);

        source.set_active(false);
        let frame = engine.drive(&mut source, FrameTime::fixed_step(1, DT));
        assert!(!frame.is_active);
        assert_eq!(frame.metrics, BandMetrics::ZERO);
        assert_eq!(frame.mesh.material.speed, 0.0);
    }

    #[test]
    fn test_publish_swaps_buffers() {
        let mut engine = quiet_engine();
        let exchange = FrameExchange::new();
        let snapshot = [128u8; 128];

        engine.tick(&snapshot, true, FrameTime::fixed_step(1, DT));
        engine.publish(&exchange);
        assert_eq!(exchange.read(|f| f.time.elapsed_s), DT);

        // Computing the next frame leaves the published one untouched
        engine.tick(&snapshot, true, FrameTime::fixed_step(2, DT));
        assert_eq!(exchange.read(|f| f.time.elapsed_s), DT);

        engine.publish(&exchange);
        assert_eq!(exchange.snapshot().time, FrameTime::fixed_step(2, DT));
    }

    #[test]
    fn test_renderer_thread_sees_complete_frames() {
        let mut engine = VisualizerEngine::with_defaults(Some(3)).unwrap();
        let exchange = FrameExchange::new();
        let reader = exchange.clone();

        let handle = std::thread::spawn(move || {
            for _ in 0..200 {
                reader.read(|f| assert_eq!(f.star_positions.len(), f.stars.active_count));
            }
        });

        let snapshot = [90u8; 128];
        for i in 0..200 {
            engine.tick(&snapshot, true, FrameTime::fixed_step(i, DT));
            engine.publish(&exchange);
        }
        handle.join().unwrap();
    }

    #[test]
    fn test_frame_exports_uniforms_and_spawn_state() {
        let mut engine = quiet_engine();
        let loud = [255u8; 128];

        let frame = engine.tick(&loud, true, FrameTime::fixed_step(3, DT));
        let uniforms = frame.mesh_uniforms();
        assert_eq!(uniforms.time, frame.time.elapsed_s);
        assert_eq!(uniforms.distort, frame.mesh.material.distort);
        assert_eq!(uniforms.speed, frame.mesh.material.speed);
        assert_eq!(
            uniforms.model,
            frame.mesh.transform.model_matrix().to_cols_array_2d()
        );

        // Bright spectrum: 30 + 140 * centroid spawns per second
        let centroid = frame.metrics.centroid;
        let expected = DT * engine.director().tuning().spawn_rate(centroid);
        assert!((engine.director().spawn_accumulator() - expected.fract()).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            bands: BandSplit {
                low_end: 0.9,
                mid_end: 0.1,
            },
            ..EngineConfig::default()
        };
        assert!(VisualizerEngine::new(config, None).is_err());
    }
}
