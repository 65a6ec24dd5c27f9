//! Blobwave - audio-reactive blob and star field driver
//!
//! Runs the animation engine against a spectrum source and reports what a
//! renderer would draw. Offline signals step a fixed clock as fast as
//! possible; the live signal plays through the speakers in real time.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use blobwave::audio::{AudioSystem, SpectrumSource, StaticSpectrum, SynthSpectrum};
use blobwave::cli::{Args, Signal};
use blobwave::clock::{FrameClock, FrameTime};
use blobwave::params::{AnalyserConfig, SessionConfig};
use blobwave::{EngineConfig, Frame, FrameExchange, VisualizerEngine};

fn main() -> Result<()> {
    let args = Args::parse();
    blobwave::logging::init(&args.log_level)?;

    let session = args.session_config();
    session.validate().context("invalid session settings")?;

    let mut engine = VisualizerEngine::new(EngineConfig::default(), session.seed)
        .context("failed to create visualizer engine")?;
    let exchange = FrameExchange::new();

    info!(signal = ?args.signal, frames = session.total_frames(), "starting session");

    match args.signal {
        Signal::Live => {
            let audio = AudioSystem::new(AnalyserConfig::default())
                .context("failed to start audio playback")?;
            run_live(&mut engine, &exchange, audio, &session)?;
        }
        Signal::Synth => {
            let mut source = SynthSpectrum::new(AnalyserConfig::default())
                .context("failed to start synthesizer")?;
            run_offline(&mut engine, &exchange, &mut source, &session, |source, active| {
                source.set_active(active)
            });
        }
        Signal::Silence | Signal::Saturated => {
            let bins = AnalyserConfig::default().bin_count();
            let mut source = if args.signal == Signal::Silence {
                StaticSpectrum::silence(bins)
            } else {
                StaticSpectrum::saturated(bins)
            };
            run_offline(&mut engine, &exchange, &mut source, &session, |source, active| {
                source.set_active(active)
            });
        }
    }

    info!("session finished");
    Ok(())
}

/// Fixed-step run with no pacing
fn run_offline<S: SpectrumSource>(
    engine: &mut VisualizerEngine,
    exchange: &FrameExchange,
    source: &mut S,
    session: &SessionConfig,
    mut set_active: impl FnMut(&mut S, bool),
) {
    let dt = session.frame_dt();
    for index in 0..session.total_frames() {
        let time = FrameTime::fixed_step(index, dt);
        set_active(source, session.is_active_at(time.elapsed_s));

        engine.drive(source, time);
        engine.publish(exchange);
        maybe_report(exchange, index, session.fps);
    }
}

/// Real-time run paced to the session frame rate
fn run_live(
    engine: &mut VisualizerEngine,
    exchange: &FrameExchange,
    mut audio: AudioSystem,
    session: &SessionConfig,
) -> Result<()> {
    let frame_budget = Duration::from_secs_f32(session.frame_dt());
    let mut clock = FrameClock::new();

    for index in 0..session.total_frames() {
        let time = clock.tick();
        if audio.is_active() && !session.is_active_at(time.elapsed_s) {
            audio.pause().context("failed to pause playback")?;
        }

        engine.drive(&mut audio, time);
        engine.publish(exchange);
        maybe_report(exchange, index, session.fps);

        thread::sleep(clock.remaining(frame_budget));
    }
    Ok(())
}

/// Log a one-line summary of the published frame once per second
fn maybe_report(exchange: &FrameExchange, index: usize, fps: u32) {
    if index % fps.max(1) as usize != 0 {
        return;
    }
    exchange.read(report);
}

fn report(frame: &Frame) {
    let m = &frame.metrics;
    let mesh = &frame.mesh;
    info!(
        t = format_args!("{:.2}", frame.time.elapsed_s),
        active = frame.is_active,
        amp = format_args!("{:.2}", m.amplitude),
        bands = format_args!("{:.2}/{:.2}/{:.2}", m.low, m.mid, m.high),
        centroid = format_args!("{:.2}", m.centroid),
        scale = format_args!("{:.3}", mesh.transform.scale),
        distort = format_args!("{:.3}", mesh.material.distort),
        speed = format_args!("{:.3}", mesh.material.speed),
        emissive = format_args!("{:.3}", mesh.material.emissive_intensity),
        stars = frame.stars.active_count,
        opacity = format_args!("{:.2}", frame.stars.opacity),
        "frame"
    );
}
