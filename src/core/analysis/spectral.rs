// src/core/analysis/spectral.rs
//
// Frame-sampled spectrum statistics: band energies, dominant frequency,
// and spectral centroid over evenly spaced FFT frames.

use serde::Serialize;

use crate::core::decoder::SampleBuffer;
use crate::core::dsp::fft::FftProcessor;
use crate::core::dsp::stats::{spectral_centroid, variation};
use crate::core::dsp::windows::WindowType;

/// Averaged spectrum statistics over the sampled frames
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralAnalysis {
    /// Mean magnitude sum over the lowest 10% of bins
    pub bass_energy: f32,
    /// Mean magnitude sum over the 10% to 40% bin range
    pub mid_energy: f32,
    /// Mean magnitude sum over the upper 60% of bins
    pub high_energy: f32,
    /// Frequency of the bin with the largest magnitude aggregated across
    /// all frames, in Hz
    pub dominant_frequency: f32,
    /// Coefficient of variation of the per-frame total magnitudes, in [0, 1]
    pub frequency_variation: f32,
    /// Centroid of the mean spectrum, in Hz
    pub spectral_centroid: f32,
    /// Per-frame total magnitude, one value per frame
    pub frame_energies: Vec<f32>,
}

/// Spectrum statistics over `frames` evenly spaced FFT frames of channel 0.
///
/// Frame starts are `i * floor(len / frames)`; each frame spans up to
/// `fft_size` samples and shorter tail frames are zero padded, so bin
/// frequencies stay `bin * sample_rate / fft_size` throughout. Band edges
/// sit at 10% and 40% of the magnitude bins. The dominant frequency is the
/// peak bin of the spectrum summed across all frames, not a per-frame
/// statistic, so a loud tone anywhere in the track wins outright.
pub fn analyze_frequency_spectrum(
    buffer: &SampleBuffer,
    fft_size: usize,
    frames: usize,
    window: WindowType,
) -> SpectralAnalysis {
    let samples = buffer.primary_channel();
    if samples.is_empty() || frames == 0 || fft_size == 0 {
        return SpectralAnalysis::default();
    }

    let mut processor = FftProcessor::new(fft_size, window);
    let segment_size = samples.len() / frames;

    let mut bass_total = 0.0f64;
    let mut mid_total = 0.0f64;
    let mut high_total = 0.0f64;
    let mut frame_energies = Vec::with_capacity(frames);
    let mut aggregate_spectrum = vec![0.0f32; fft_size / 2];

    for i in 0..frames {
        let start = (i * segment_size).min(samples.len() - 1);
        let end = (start + fft_size).min(samples.len());
        let spectrum = processor.magnitude_spectrum(&samples[start..end]);

        let bins = spectrum.len();
        let bass_end = bins / 10;
        let mid_end = bins * 4 / 10;

        let mut bass = 0.0f32;
        let mut mid = 0.0f32;
        let mut high = 0.0f32;

        for (j, &magnitude) in spectrum.iter().enumerate() {
            if j < bass_end {
                bass += magnitude;
            } else if j < mid_end {
                mid += magnitude;
            } else {
                high += magnitude;
            }
            aggregate_spectrum[j] += magnitude;
        }

        bass_total += bass as f64;
        mid_total += mid as f64;
        high_total += high as f64;
        frame_energies.push(bass + mid + high);
    }

    // First strict maximum wins on ties
    let mut max_magnitude = 0.0f32;
    let mut dominant_bin = 0usize;
    for (j, &magnitude) in aggregate_spectrum.iter().enumerate() {
        if magnitude > max_magnitude {
            max_magnitude = magnitude;
            dominant_bin = j;
        }
    }
    let dominant_frequency = dominant_bin as f32 * buffer.sample_rate as f32 / fft_size as f32;

    for bin in &mut aggregate_spectrum {
        *bin /= frames as f32;
    }

    SpectralAnalysis {
        bass_energy: (bass_total / frames as f64) as f32,
        mid_energy: (mid_total / frames as f64) as f32,
        high_energy: (high_total / frames as f64) as f32,
        dominant_frequency,
        frequency_variation: variation(&frame_energies).clamp(0.0, 1.0),
        spectral_centroid: spectral_centroid(&aggregate_spectrum, buffer.sample_rate),
        frame_energies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_buffer(freq: f32, secs: f32, sample_rate: u32) -> SampleBuffer {
        let count = (sample_rate as f32 * secs) as usize;
        let samples = (0..count)
            .map(|i| {
                (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin() * 0.8
            })
            .collect();
        SampleBuffer::from_channels(sample_rate, vec![samples])
    }

    #[test]
    fn test_sine_dominant_frequency() {
        let buffer = sine_buffer(440.0, 2.0, 44100);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);

        // One-bin tolerance at 44.1 kHz / 2048
        assert!((analysis.dominant_frequency - 440.0).abs() < 30.0);
    }

    #[test]
    fn test_dominant_frequency_is_the_loudest_bin_overall() {
        // Quiet 400 Hz for the first half, loud 3000 Hz for the second.
        // The aggregate peak sits at 3000 Hz; no frame averaging may pull
        // the result toward a frequency the signal never contains.
        let rate = 8000u32;
        let half = rate as usize * 2;
        let samples: Vec<f32> = (0..half)
            .map(|i| (2.0 * std::f32::consts::PI * 400.0 * i as f32 / rate as f32).sin() * 0.5)
            .chain((0..half).map(|i| {
                (2.0 * std::f32::consts::PI * 3000.0 * i as f32 / rate as f32).sin() * 1.0
            }))
            .collect();
        let buffer = SampleBuffer::from_channels(rate, vec![samples]);

        let analysis = analyze_frequency_spectrum(&buffer, 1024, 8, WindowType::Hann);

        // One-bin tolerance at 8 kHz / 1024
        assert!(
            (analysis.dominant_frequency - 3000.0).abs() < 8.0,
            "dominant was {} Hz",
            analysis.dominant_frequency
        );
    }

    #[test]
    fn test_low_tone_lands_in_bass_band() {
        let buffer = sine_buffer(440.0, 2.0, 44100);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);

        assert!(analysis.bass_energy > analysis.mid_energy);
        assert!(analysis.bass_energy > analysis.high_energy);
    }

    #[test]
    fn test_mid_tone_lands_in_mid_band() {
        let buffer = sine_buffer(3000.0, 2.0, 44100);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);

        assert!(analysis.mid_energy > analysis.bass_energy);
        assert!(analysis.mid_energy > analysis.high_energy);
    }

    #[test]
    fn test_high_tone_lands_in_high_band() {
        let buffer = sine_buffer(10000.0, 2.0, 44100);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);

        assert!(analysis.high_energy > analysis.bass_energy);
        assert!(analysis.high_energy > analysis.mid_energy);
    }

    #[test]
    fn test_silence_yields_zero_spectrum() {
        let buffer = SampleBuffer::from_channels(44100, vec![vec![0.0; 44100]]);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);

        assert_eq!(analysis.bass_energy, 0.0);
        assert_eq!(analysis.mid_energy, 0.0);
        assert_eq!(analysis.high_energy, 0.0);
        assert_eq!(analysis.dominant_frequency, 0.0);
        assert_eq!(analysis.spectral_centroid, 0.0);
        assert_eq!(analysis.frequency_variation, 0.0);
    }

    #[test]
    fn test_one_energy_value_per_frame() {
        let buffer = sine_buffer(440.0, 1.0, 44100);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);
        assert_eq!(analysis.frame_energies.len(), 100);
    }

    #[test]
    fn test_steady_tone_has_low_frequency_variation() {
        let buffer = sine_buffer(1000.0, 2.0, 44100);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);

        assert!(analysis.frequency_variation < 0.2);
        assert!(analysis.frequency_variation >= 0.0);
    }

    #[test]
    fn test_short_input_still_produces_frames() {
        // Fewer samples than frames: every frame reads from the start
        let buffer = sine_buffer(440.0, 0.001, 44100);
        let analysis = analyze_frequency_spectrum(&buffer, 2048, 100, WindowType::Hann);
        assert_eq!(analysis.frame_energies.len(), 100);
    }
}
