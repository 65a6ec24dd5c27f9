//! Live playback through the default output device with background analysis.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use tracing::{info, warn};

use super::fft::spawn_analysis_thread;
use super::spectrum::SpectrumAnalyser;
use super::synthesis::build_engine;
use super::SpectrumSource;
use crate::error::AudioError;
use crate::params::{audio_constants::BLOCK_SIZE, AnalyserConfig};

/// Plays the composition and publishes its spectrum
pub struct AudioSystem {
    /// Spectrum written by the analysis thread
    shared_snapshot: Arc<Mutex<Vec<u8>>>,

    /// Copy taken at the last `poll`, read by the engine
    snapshot: Vec<u8>,

    playing: Arc<AtomicBool>,
    running: Arc<AtomicBool>,

    /// Audio output stream (kept alive)
    stream: cpal::Stream,

    analysis_thread: Option<thread::JoinHandle<()>>,
}

impl AudioSystem {
    /// Open the default output device and start playback
    pub fn new(mut config: AnalyserConfig) -> Result<Self, AudioError> {
        config.validate()?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let stream_config = device.default_output_config()?;

        let channels = stream_config.channels().max(1) as usize;
        config.sample_rate_hz = stream_config.sample_rate().0 as usize;
        info!(
            device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz = config.sample_rate_hz,
            channels,
            "audio output opened"
        );

        let mut engine = build_engine(config.sample_rate_hz)?;
        let analyser = SpectrumAnalyser::new(config.clone())?;
        let bins = analyser.bin_count();

        let pcm = Arc::new(Mutex::new(Vec::<f32>::new()));
        let pcm_callback = Arc::clone(&pcm);
        // Bound the backlog if the analysis thread falls behind
        let pcm_limit = config.fft_size * 8;

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frames_needed = data.len() / channels;
                let mut pcm = pcm_callback.lock().unwrap_or_else(PoisonError::into_inner);
                let mut frame_idx = 0;

                // Generate multiple blocks if needed to fill the entire buffer
                while frame_idx < frames_needed {
                    let (buffers, _) = engine.next_block(vec![]);
                    let frames_to_copy = (frames_needed - frame_idx).min(BLOCK_SIZE);

                    for i in 0..frames_to_copy {
                        // Hard clip
                        let left = buffers[0][i].clamp(-0.5, 0.5);
                        let right = buffers[1][i].clamp(-0.5, 0.5);

                        let out = (frame_idx + i) * channels;
                        for (ch, sample) in data[out..out + channels].iter_mut().enumerate() {
                            *sample = if ch % 2 == 0 { left } else { right };
                        }
                        pcm.push(left);
                    }

                    frame_idx += frames_to_copy;
                }

                if pcm.len() > pcm_limit {
                    let excess = pcm.len() - pcm_limit;
                    pcm.drain(..excess);
                }
            },
            |err| warn!("audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        let shared_snapshot = Arc::new(Mutex::new(vec![0u8; bins]));
        let running = Arc::new(AtomicBool::new(true));
        let analysis_thread = spawn_analysis_thread(
            analyser,
            config.update_interval_ms,
            pcm,
            Arc::clone(&shared_snapshot),
            Arc::clone(&running),
        );

        Ok(Self {
            shared_snapshot,
            snapshot: vec![0; bins],
            playing: Arc::new(AtomicBool::new(true)),
            running,
            stream,
            analysis_thread: Some(analysis_thread),
        })
    }

    /// Pause playback; the source reports inactive until resumed
    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream.pause()?;
        self.playing.store(false, Ordering::Release);
        info!("playback paused");
        Ok(())
    }

    pub fn resume(&self) -> Result<(), AudioError> {
        self.stream.play()?;
        self.playing.store(true, Ordering::Release);
        info!("playback resumed");
        Ok(())
    }
}

impl SpectrumSource for AudioSystem {
    fn poll(&mut self, _dt_s: f32) {
        let shared = self
            .shared_snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.snapshot.clear();
        self.snapshot.extend_from_slice(&shared);
    }

    fn snapshot(&self) -> &[u8] {
        &self.snapshot
    }

    fn is_active(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }
}

impl Drop for AudioSystem {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.analysis_thread.take() {
            if handle.join().is_err() {
                warn!("analysis thread panicked");
            }
        }
    }
}
