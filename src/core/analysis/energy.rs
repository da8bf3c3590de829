// src/core/analysis/energy.rs
//
// Windowed RMS energy envelope with relative-threshold peak picking.

use serde::Serialize;

use crate::core::decoder::SampleBuffer;
use crate::core::dsp::stats::{find_relative_peaks, rms, std_dev};

/// Envelope peaks must exceed this fraction of the envelope maximum
const PEAK_THRESHOLD: f32 = 0.7;

/// One detected envelope peak
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPeak {
    /// Envelope window index
    pub position: usize,
    pub energy: f32,
    /// Seconds from track start
    pub timestamp: f32,
}

/// Energy envelope summary over fixed windows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyAnalysis {
    /// Per-window RMS, each clamped to [0, 1]
    pub levels: Vec<f32>,
    /// Strict local maxima above 0.7x the envelope maximum
    pub peaks: Vec<EnergyPeak>,
    pub average: f32,
    pub max: f32,
    /// Population stddev of the levels
    pub variation: f32,
    /// max - min over the levels
    pub dynamic_range: f32,
    /// Window duration the envelope was computed with
    pub window_secs: f32,
}

/// Windowed RMS envelope of channel 0.
///
/// Windows are non-overlapping, `floor(sample_rate * window_secs)` samples
/// each; the trailing partial window is included when non-empty. An empty
/// buffer yields a zeroed result.
pub fn analyze_energy_levels(buffer: &SampleBuffer, window_secs: f32) -> EnergyAnalysis {
    let samples = buffer.primary_channel();
    let window_size = (buffer.sample_rate as f32 * window_secs) as usize;
    if samples.is_empty() || window_size == 0 {
        return EnergyAnalysis {
            window_secs,
            ..Default::default()
        };
    }

    let levels: Vec<f32> = samples
        .chunks(window_size)
        .map(|w| rms(w).clamp(0.0, 1.0))
        .collect();

    let peaks = find_relative_peaks(&levels, PEAK_THRESHOLD)
        .into_iter()
        .map(|i| EnergyPeak {
            position: i,
            energy: levels[i],
            timestamp: i as f32 * window_secs,
        })
        .collect();

    let average = levels.iter().sum::<f32>() / levels.len() as f32;
    let max = levels.iter().fold(0.0f32, |a, &b| a.max(b));
    let min = levels.iter().fold(f32::MAX, |a, &b| a.min(b));

    EnergyAnalysis {
        average,
        max,
        variation: std_dev(&levels),
        dynamic_range: max - min,
        levels,
        peaks,
        window_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_from(samples: Vec<f32>, sample_rate: u32) -> SampleBuffer {
        SampleBuffer::from_channels(sample_rate, vec![samples])
    }

    #[test]
    fn test_constant_signal_has_flat_envelope() {
        let buffer = buffer_from(vec![0.5; 4000], 1000);
        let analysis = analyze_energy_levels(&buffer, 0.5);

        assert_eq!(analysis.levels.len(), 8);
        assert!(analysis.levels.iter().all(|&l| (l - 0.5).abs() < 1e-5));
        assert!(analysis.peaks.is_empty());
        assert!(analysis.variation < 1e-6);
        assert!(analysis.dynamic_range < 1e-6);
    }

    #[test]
    fn test_silence_yields_zeroed_envelope() {
        let buffer = buffer_from(vec![0.0; 4410], 44100);
        let analysis = analyze_energy_levels(&buffer, 0.5);

        assert!(analysis.levels.iter().all(|&l| l == 0.0));
        assert!(analysis.peaks.is_empty());
        assert_eq!(analysis.average, 0.0);
        assert_eq!(analysis.max, 0.0);
    }

    #[test]
    fn test_single_loud_window_is_a_peak() {
        // Five windows of 500 samples; the middle one is loud
        let mut samples = vec![0.1f32; 2500];
        for s in &mut samples[1000..1500] {
            *s = 0.9;
        }
        let buffer = buffer_from(samples, 1000);
        let analysis = analyze_energy_levels(&buffer, 0.5);

        assert_eq!(analysis.levels.len(), 5);
        assert_eq!(analysis.peaks.len(), 1);
        assert_eq!(analysis.peaks[0].position, 2);
        assert!((analysis.peaks[0].timestamp - 1.0).abs() < 1e-6);
        assert!((analysis.peaks[0].energy - 0.9).abs() < 1e-3);
    }

    #[test]
    fn test_trailing_partial_window_included() {
        let buffer = buffer_from(vec![0.4; 1250], 1000);
        let analysis = analyze_energy_levels(&buffer, 0.5);
        // 500 + 500 + 250 samples
        assert_eq!(analysis.levels.len(), 3);
        assert!((analysis.levels[2] - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_scaling_up_never_lowers_levels() {
        let samples: Vec<f32> = (0..4000).map(|i| (i as f32 * 0.01).sin() * 0.2).collect();
        let scaled: Vec<f32> = samples.iter().map(|s| s * 3.0).collect();

        let base = analyze_energy_levels(&buffer_from(samples, 1000), 0.5);
        let louder = analyze_energy_levels(&buffer_from(scaled, 1000), 0.5);

        for (a, b) in base.levels.iter().zip(&louder.levels) {
            assert!(b >= a);
            assert!(*b <= 1.0);
        }
    }

    #[test]
    fn test_rms_clamped_at_ceiling() {
        let buffer = buffer_from(vec![4.0; 1000], 1000);
        let analysis = analyze_energy_levels(&buffer, 0.5);
        assert!(analysis.levels.iter().all(|&l| l == 1.0));
        assert_eq!(analysis.max, 1.0);
    }
}
