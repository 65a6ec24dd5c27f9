//! Command-line argument parsing.

use clap::{Parser, ValueEnum};

use crate::params::SessionConfig;

/// Where the spectrum comes from
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Signal {
    /// Glicol composition synthesized and analysed offline (no device)
    Synth,
    /// All-zero spectrum
    Silence,
    /// Full-scale spectrum
    Saturated,
    /// Glicol composition played through the default output device
    Live,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "blobwave")]
#[command(about = "Audio-reactive blob and star field engine", long_about = None)]
pub struct Args {
    /// Spectrum source
    #[arg(long, value_enum, default_value = "synth")]
    pub signal: Signal,

    /// Session length (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "10")]
    pub duration: f32,

    /// Frame rate (FPS)
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Stop the signal at this time to watch the visuals wind down
    #[arg(long, value_name = "SECONDS")]
    pub pause_at: Option<f32>,

    /// Seed for star jitter (reproducible runs)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Session settings from command-line arguments
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            fps: self.fps,
            duration_secs: self.duration,
            pause_at_secs: self.pause_at,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["blobwave"]);
        assert_eq!(args.signal, Signal::Synth);
        assert_eq!(args.fps, 60);
        assert_eq!(args.session_config().total_frames(), 600);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "blobwave",
            "--signal",
            "saturated",
            "--duration",
            "2",
            "--pause-at",
            "1.5",
            "--seed",
            "9",
        ]);
        let session = args.session_config();
        assert_eq!(args.signal, Signal::Saturated);
        assert_eq!(session.pause_at_secs, Some(1.5));
        assert_eq!(session.seed, Some(9));
        assert_eq!(session.total_frames(), 120);
    }
}
