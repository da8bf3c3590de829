// src/core/analysis/hooks.rs
//
// Hook identification: the track is tiled into fixed-length segments and
// each segment is scored from energy, frequency content, vocal presence,
// and its position within the track.

use serde::Serialize;

use crate::config::HookWeights;
use crate::core::analysis::energy::EnergyAnalysis;
use crate::core::analysis::spectral::SpectralAnalysis;
use crate::core::analysis::vocal::VocalAnalysis;

/// One scored candidate segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSegment {
    /// Segment bounds in seconds
    pub start_time: f32,
    pub end_time: f32,
    /// Weighted combination of the four sub-scores, in [0, 1]
    pub score: f32,
    pub energy: f32,
    pub frequency: f32,
    pub vocal: f32,
    pub position: f32,
}

/// All candidate segments, strongest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookAnalysis {
    /// Every segment of the track, sorted by descending score
    pub segments: Vec<HookSegment>,
    /// The top segment, absent for an empty track
    pub best_hook: Option<HookSegment>,
    /// Mean segment score
    pub average_hook_potential: f32,
}

/// Score every `segment_secs` tile of the track.
///
/// Segments tile `[0, duration)`; the last one is shortened to the track
/// end. Energy and frequency sub-scores are segment means relative to the
/// corresponding track-wide maximum, the vocal sub-score is the mean
/// window score, and the position score favours the 30% to 70% span of
/// the track. Equal scores keep their track order.
pub fn identify_hooks(
    energy: &EnergyAnalysis,
    spectral: &SpectralAnalysis,
    vocal: &VocalAnalysis,
    duration: f32,
    segment_secs: f32,
    weights: &HookWeights,
) -> HookAnalysis {
    if duration <= 0.0 || segment_secs <= 0.0 {
        return HookAnalysis::default();
    }

    let max_level = energy.levels.iter().fold(0.0f32, |a, &b| a.max(b));
    let max_frame = spectral
        .frame_energies
        .iter()
        .fold(0.0f32, |a, &b| a.max(b));
    let frame_step = if spectral.frame_energies.is_empty() {
        0.0
    } else {
        duration / spectral.frame_energies.len() as f32
    };

    let count = (duration / segment_secs).ceil() as usize;
    let mut segments: Vec<HookSegment> = (0..count)
        .map(|i| {
            let start = i as f32 * segment_secs;
            let end = (start + segment_secs).min(duration);

            let energy_score =
                relative_mean(&energy.levels, energy.window_secs, start, end, max_level);
            let frequency_score =
                relative_mean(&spectral.frame_energies, frame_step, start, end, max_frame);
            let vocal_score =
                range_mean(&vocal.window_scores, vocal.window_secs, start, end).clamp(0.0, 1.0);
            let position = position_score(start, duration);

            let score = energy_score * weights.energy
                + frequency_score * weights.frequency
                + vocal_score * weights.vocal
                + position * weights.position;

            HookSegment {
                start_time: start,
                end_time: end,
                score: score.clamp(0.0, 1.0),
                energy: energy_score,
                frequency: frequency_score,
                vocal: vocal_score,
                position,
            }
        })
        .collect();

    segments.sort_by(|a, b| b.score.total_cmp(&a.score));

    let average_hook_potential = if segments.is_empty() {
        0.0
    } else {
        segments.iter().map(|s| s.score).sum::<f32>() / segments.len() as f32
    };

    HookAnalysis {
        best_hook: segments.first().cloned(),
        segments,
        average_hook_potential,
    }
}

/// Mean of the series values overlapping `[start, end)`
fn range_mean(series: &[f32], step: f32, start: f32, end: f32) -> f32 {
    if series.is_empty() || step < 1e-10 {
        return 0.0;
    }
    let lo = (start / step) as usize;
    let hi = ((end / step).ceil() as usize).min(series.len());
    if lo >= hi {
        return 0.0;
    }
    series[lo..hi].iter().sum::<f32>() / (hi - lo) as f32
}

/// Segment mean normalized by the track-wide maximum
fn relative_mean(series: &[f32], step: f32, start: f32, end: f32, max: f32) -> f32 {
    if max < 1e-10 {
        return 0.0;
    }
    (range_mean(series, step, start, end) / max).clamp(0.0, 1.0)
}

/// Early segments score 0.9, the 30% to 70% span 1.0, the tail 0.6
fn position_score(start: f32, duration: f32) -> f32 {
    let progress = start / duration;
    if progress < 0.3 {
        0.9
    } else if progress < 0.7 {
        1.0
    } else {
        0.6
    }
}
