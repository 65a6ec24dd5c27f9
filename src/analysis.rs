//! Band decomposition of byte spectrum snapshots.

use crate::params::BandSplit;

/// Normalized per-frame spectrum summary
///
/// Every field lies in [0, 1] and is finite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandMetrics {
    /// Mean energy over all bins
    pub amplitude: f32,
    pub low: f32,
    pub mid: f32,
    pub high: f32,
    /// Energy-weighted mean bin index divided by the bin count
    pub centroid: f32,
}

impl BandMetrics {
    pub const ZERO: Self = Self {
        amplitude: 0.0,
        low: 0.0,
        mid: 0.0,
        high: 0.0,
        centroid: 0.0,
    };
}

/// Splits snapshots into low/mid/high energy plus amplitude and centroid
#[derive(Debug, Clone, Default)]
pub struct BandAnalyzer {
    split: BandSplit,
}

impl BandAnalyzer {
    pub fn new(split: BandSplit) -> Self {
        Self { split }
    }

    /// Summarize one snapshot
    ///
    /// An empty snapshot or an inactive signal yields all zeros.
    pub fn analyze(&self, snapshot: &[u8], is_active: bool) -> BandMetrics {
        let len = snapshot.len();
        if len == 0 || !is_active {
            return BandMetrics::ZERO;
        }

        let (low_bins, mid_bins, high_bins) = self.split.ranges(len);

        let mut sum = 0u64;
        let mut weighted = 0u64;
        for (i, &v) in snapshot.iter().enumerate() {
            sum += v as u64;
            weighted += v as u64 * i as u64;
        }

        let centroid = if sum > 0 {
            (weighted as f64 / sum as f64 / len as f64) as f32
        } else {
            0.0
        };

        BandMetrics {
            amplitude: unit(mean_energy(snapshot)),
            low: unit(mean_energy(&snapshot[low_bins])),
            mid: unit(mean_energy(&snapshot[mid_bins])),
            high: unit(mean_energy(&snapshot[high_bins])),
            centroid: unit(centroid),
        }
    }
}

/// Mean of `bins` scaled to [0, 1]; an empty range counts as silence
fn mean_energy(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u64 = bins.iter().map(|&v| v as u64).sum();
    (sum as f64 / (bins.len() as f64 * 255.0)) as f32
}

fn unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_unit_range(m: &BandMetrics) {
        for v in [m.amplitude, m.low, m.mid, m.high, m.centroid] {
            assert!(v.is_finite());
            assert!((0.0..=1.0).contains(&v), "{v} out of range in {m:?}");
        }
    }

    #[test]
    fn test_empty_snapshot_is_zero() {
        let analyzer = BandAnalyzer::default();
        assert_eq!(analyzer.analyze(&[], true), BandMetrics::ZERO);
    }

    #[test]
    fn test_inactive_signal_is_zero() {
        let analyzer = BandAnalyzer::default();
        assert_eq!(analyzer.analyze(&[255; 128], false), BandMetrics::ZERO);
    }

    #[test]
    fn test_silence() {
        let m = BandAnalyzer::default().analyze(&[0; 128], true);
        assert_eq!(m, BandMetrics::ZERO);
    }

    #[test]
    fn test_saturation() {
        let m = BandAnalyzer::default().analyze(&[255; 128], true);
        assert_eq!(m.amplitude, 1.0);
        assert_eq!(m.low, 1.0);
        assert_eq!(m.mid, 1.0);
        assert_eq!(m.high, 1.0);

        // Flat spectrum: mean index (127 / 2) over 128 bins
        assert!((m.centroid - 63.5 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_bands_are_isolated() {
        // Energy only in the low band (bins 0..19 of 128)
        let mut snapshot = [0u8; 128];
        snapshot[..19].fill(255);

        let m = BandAnalyzer::default().analyze(&snapshot, true);
        assert_eq!(m.low, 1.0);
        assert_eq!(m.mid, 0.0);
        assert_eq!(m.high, 0.0);
        assert!((m.amplitude - 19.0 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_centroid_tracks_brightness() {
        let analyzer = BandAnalyzer::default();

        let mut dark = [0u8; 128];
        dark[2] = 200;
        let mut bright = [0u8; 128];
        bright[100] = 200;

        let dark = analyzer.analyze(&dark, true);
        let bright = analyzer.analyze(&bright, true);
        assert!((dark.centroid - 2.0 / 128.0).abs() < 1e-6);
        assert!((bright.centroid - 100.0 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_outputs_in_range_for_any_length_and_content() {
        let analyzer = BandAnalyzer::default();
        let mut rng = fastrand::Rng::with_seed(7);

        for len in 0..300 {
            let snapshot: Vec<u8> = (0..len).map(|_| rng.u8(..)).collect();
            assert_in_unit_range(&analyzer.analyze(&snapshot, true));
        }

        // Tiny spectra have empty bands; those read as zero
        let m = analyzer.analyze(&[255], true);
        assert_eq!(m.low, 0.0);
        assert_eq!(m.mid, 0.0);
        assert_eq!(m.high, 1.0);
        assert_in_unit_range(&m);
    }
}
