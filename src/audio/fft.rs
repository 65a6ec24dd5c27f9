//! Analysis thread and window utilities.

use std::f32::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::spectrum::SpectrumAnalyser;

/// Spawn the live analysis thread
///
/// Every `interval_ms` the thread drains the PCM accumulated by the audio
/// callback, analyses the most recent window and publishes the byte
/// spectrum. It exits once `running` is cleared.
pub fn spawn_analysis_thread(
    mut analyser: SpectrumAnalyser,
    interval_ms: u64,
    pcm: Arc<Mutex<Vec<f32>>>,
    snapshot: Arc<Mutex<Vec<u8>>>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        debug!(bins = analyser.bin_count(), "analysis thread started");

        while running.load(Ordering::Acquire) {
            thread::sleep(Duration::from_millis(interval_ms));

            {
                let mut pcm = pcm.lock().unwrap_or_else(PoisonError::into_inner);
                if pcm.is_empty() {
                    continue;
                }
                analyser.push_samples(&pcm);
                pcm.clear();
            }

            let bytes = analyser.analyse();
            let mut shared = snapshot.lock().unwrap_or_else(PoisonError::into_inner);
            shared.clear();
            shared.extend_from_slice(bytes);
        }

        debug!("analysis thread stopped");
    })
}

/// Blackman window coefficient (alpha = 0.16)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blackman_window() {
        let size = 256;

        // Zero at the leading edge, 1 at the center
        assert!(blackman_window(0, size).abs() < 1e-6);
        assert!((blackman_window(size / 2, size) - 1.0).abs() < 1e-6);
        assert!((blackman_window(size / 4, size) - blackman_window(3 * size / 4, size)).abs() < 1e-5);
    }
}
