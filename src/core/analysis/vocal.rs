// src/core/analysis/vocal.rs
//
// Vocal presence heuristic: pre-emphasized frames are transformed with a
// real FFT and scored by the share of spectral energy in the 1-3 kHz
// vocal band relative to the 85 Hz - 8 kHz speech band.

use num_complex::Complex;
use realfft::RealFftPlanner;
use serde::Serialize;

use crate::core::decoder::SampleBuffer;
use crate::core::dsp::filters::pre_emphasis;
use crate::core::dsp::stats::{autocorrelation, find_relative_peaks};
use crate::core::dsp::windows::{create_window, WindowType};

const VOCAL_FFT_SIZE: usize = 4096;
const PRE_EMPHASIS_COEF: f32 = 0.97;

/// Vocal band bounds in Hz
const VOCAL_LOW: f32 = 1000.0;
const VOCAL_HIGH: f32 = 3000.0;

/// Wider speech band the vocal energy is measured against, in Hz
const SPEECH_LOW: f32 = 85.0;
const SPEECH_HIGH: f32 = 8000.0;

/// Band ratio at which a window scores a full 1.0
const RATIO_FULL_SCALE: f32 = 0.35;

const PEAK_THRESHOLD: f32 = 0.7;
const PROMINENT_THRESHOLD: f32 = 0.6;

/// One window where the vocal score peaks over its neighbourhood
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocalPeak {
    /// Window index
    pub position: usize,
    pub score: f32,
    /// Seconds from track start
    pub timestamp: f32,
}

/// Vocal presence summary over fixed windows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocalAnalysis {
    /// Mean window score, in [0, 1]
    pub presence: f32,
    /// Mean peak-to-mean sharpness of the vocal band, in [0, 1]
    pub clarity: f32,
    /// Periodicity of the score series, in [0, 1]
    pub melodicity: f32,
    /// Strict local maxima above 0.7x the score maximum
    pub peaks: Vec<VocalPeak>,
    /// Per-window vocal score
    pub window_scores: Vec<f32>,
    /// Window duration the scores were computed with
    pub window_secs: f32,
    pub has_prominent_vocals: bool,
}

/// Vocal presence estimate over channel 0.
///
/// The signal is pre-emphasized, then one FFT frame is taken at the start
/// of each non-overlapping window of `floor(sample_rate * window_secs)`
/// samples. A window's score is the vocal-to-speech band magnitude ratio
/// scaled so 0.35 maps to 1.0. Melodicity is the strongest non-zero-lag
/// autocorrelation of the mean-removed score series; fewer than four
/// windows yield 0.
pub fn analyze_vocal(buffer: &SampleBuffer, window_secs: f32) -> VocalAnalysis {
    let samples = buffer.primary_channel();
    let window_size = (buffer.sample_rate as f32 * window_secs) as usize;
    if samples.is_empty() || window_size == 0 {
        return VocalAnalysis {
            window_secs,
            ..Default::default()
        };
    }

    let emphasized = pre_emphasis(samples, PRE_EMPHASIS_COEF);
    let window = create_window(VOCAL_FFT_SIZE, WindowType::Hann);

    let mut planner = RealFftPlanner::<f32>::new();
    let r2c = planner.plan_fft_forward(VOCAL_FFT_SIZE);
    let mut input = r2c.make_input_vec();
    let mut spectrum: Vec<Complex<f32>> = r2c.make_output_vec();

    let vocal_lo = frequency_bin(VOCAL_LOW, buffer.sample_rate, spectrum.len());
    let vocal_hi = frequency_bin(VOCAL_HIGH, buffer.sample_rate, spectrum.len());
    let speech_lo = frequency_bin(SPEECH_LOW, buffer.sample_rate, spectrum.len());
    let speech_hi = frequency_bin(SPEECH_HIGH, buffer.sample_rate, spectrum.len());

    let mut window_scores = Vec::new();
    let mut clarity_total = 0.0f32;

    for chunk in emphasized.chunks(window_size) {
        let frame_len = chunk.len().min(VOCAL_FFT_SIZE);
        for (i, slot) in input.iter_mut().enumerate() {
            *slot = if i < frame_len {
                chunk[i] * window[i]
            } else {
                0.0
            };
        }

        if r2c.process(&mut input, &mut spectrum).is_err() {
            window_scores.push(0.0);
            continue;
        }

        let magnitudes: Vec<f32> = spectrum.iter().map(|c| c.norm()).collect();

        let vocal_sum: f32 = magnitudes[vocal_lo..=vocal_hi].iter().sum();
        let speech_sum: f32 = magnitudes[speech_lo..=speech_hi].iter().sum();

        let score = if speech_sum < 1e-10 {
            0.0
        } else {
            (vocal_sum / speech_sum / RATIO_FULL_SCALE).min(1.0)
        };
        window_scores.push(score);
        clarity_total += band_sharpness(&magnitudes[vocal_lo..=vocal_hi]);
    }

    let presence = window_scores.iter().sum::<f32>() / window_scores.len() as f32;
    let clarity = clarity_total / window_scores.len() as f32;
    let melodicity = score_periodicity(&window_scores);

    let peaks = find_relative_peaks(&window_scores, PEAK_THRESHOLD)
        .into_iter()
        .map(|i| VocalPeak {
            position: i,
            score: window_scores[i],
            timestamp: i as f32 * window_secs,
        })
        .collect();

    VocalAnalysis {
        presence,
        clarity,
        melodicity,
        peaks,
        has_prominent_vocals: presence > PROMINENT_THRESHOLD,
        window_scores,
        window_secs,
    }
}

/// Nearest magnitude bin for a frequency, clamped to the spectrum
fn frequency_bin(freq: f32, sample_rate: u32, bins: usize) -> usize {
    let bin = (freq * VOCAL_FFT_SIZE as f32 / sample_rate as f32).round() as usize;
    bin.min(bins.saturating_sub(1))
}

/// Peak-to-mean ratio of a band mapped onto [0, 1]; 1x maps to 0, 10x to 1
fn band_sharpness(band: &[f32]) -> f32 {
    if band.is_empty() {
        return 0.0;
    }
    let mean = band.iter().sum::<f32>() / band.len() as f32;
    if mean < 1e-10 {
        return 0.0;
    }
    let peak = band.iter().fold(0.0f32, |a, &b| a.max(b));
    ((peak / mean - 1.0) / 9.0).clamp(0.0, 1.0)
}

/// Strongest non-zero-lag autocorrelation of the mean-removed series
fn score_periodicity(scores: &[f32]) -> f32 {
    if scores.len() < 4 {
        return 0.0;
    }
    let mean = scores.iter().sum::<f32>() / scores.len() as f32;
    let centered: Vec<f32> = scores.iter().map(|s| s - mean).collect();
    let correlations = autocorrelation(&centered, scores.len() / 2);
    correlations
        .iter()
        .skip(1)
        .fold(0.0f32, |a, &b| a.max(b))
        .clamp(0.0, 1.0)
}
