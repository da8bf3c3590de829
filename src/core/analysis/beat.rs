// src/core/analysis/beat.rs
//
// Onset envelope over short windows, peak-picked beat times, and a tempo
// estimate derived from the mean inter-beat interval.

use serde::Serialize;

use crate::core::decoder::SampleBuffer;
use crate::core::dsp::stats::{find_relative_peaks, mean_abs, std_dev};

/// Beat peaks must exceed this fraction of the envelope maximum
const BEAT_THRESHOLD: f32 = 0.6;

/// Tempo reported when fewer than two beats were found
const FALLBACK_BPM: u32 = 120;

const MIN_BPM: f32 = 60.0;
const MAX_BPM: f32 = 200.0;

/// Tempo range treated as danceable, in BPM
const DANCE_BPM_LOW: u32 = 120;
const DANCE_BPM_HIGH: u32 = 140;

/// Tempo and rhythm regularity summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeatAnalysis {
    /// Estimated tempo, clamped to [60, 200]
    pub bpm: u32,
    /// Maximum of the onset envelope
    pub strength: f32,
    /// 1 - stddev/max of the envelope, in [0, 1]
    pub consistency: f32,
    /// The onset envelope itself, one value per window
    pub positions: Vec<f32>,
    /// True when the tempo is the fallback value, not a measurement
    pub tempo_is_fallback: bool,
    pub has_strong_beat: bool,
    /// Measured tempo within the 120-140 BPM dance range. The fallback
    /// tempo is 120 but never sets this flag.
    pub is_danceable: bool,
}

/// Beat detection over channel 0.
///
/// The envelope is the mean absolute amplitude per non-overlapping window
/// of `floor(sample_rate * window_secs)` samples, trailing partial window
/// included. Beats are strict local maxima above 0.6x the envelope
/// maximum; tempo is 60 over the mean inter-beat interval, clamped to
/// [60, 200]. With fewer than two beats the tempo falls back to 120 and
/// `tempo_is_fallback` is set. `is_danceable` requires a measured tempo
/// in [120, 140], so the fallback never counts as danceable.
pub fn analyze_beat(buffer: &SampleBuffer, window_secs: f32) -> BeatAnalysis {
    let samples = buffer.primary_channel();
    let window_size = (buffer.sample_rate as f32 * window_secs) as usize;
    if samples.is_empty() || window_size == 0 {
        return BeatAnalysis {
            bpm: FALLBACK_BPM,
            strength: 0.0,
            consistency: 1.0,
            positions: Vec::new(),
            tempo_is_fallback: true,
            has_strong_beat: false,
            is_danceable: false,
        };
    }

    let envelope: Vec<f32> = samples
        .chunks(window_size)
        .map(|w| mean_abs(w).clamp(0.0, 1.0))
        .collect();

    let beat_times: Vec<f32> = find_relative_peaks(&envelope, BEAT_THRESHOLD)
        .into_iter()
        .map(|i| i as f32 * window_secs)
        .collect();

    let (bpm, tempo_is_fallback) = estimate_bpm(&beat_times);

    let strength = envelope.iter().fold(0.0f32, |a, &b| a.max(b));
    let consistency = if strength < 1e-10 {
        1.0
    } else {
        (1.0 - std_dev(&envelope) / strength).clamp(0.0, 1.0)
    };

    BeatAnalysis {
        bpm,
        strength,
        consistency,
        positions: envelope,
        tempo_is_fallback,
        has_strong_beat: strength > 0.7,
        is_danceable: !tempo_is_fallback && (DANCE_BPM_LOW..=DANCE_BPM_HIGH).contains(&bpm),
    }
}

/// Mean-interval tempo estimate; (120, true) with fewer than two beats.
fn estimate_bpm(beat_times: &[f32]) -> (u32, bool) {
    if beat_times.len() < 2 {
        return (FALLBACK_BPM, true);
    }
    let intervals: Vec<f32> = beat_times.windows(2).map(|p| p[1] - p[0]).collect();
    let avg_interval = intervals.iter().sum::<f32>() / intervals.len() as f32;
    let bpm = (60.0 / avg_interval).round().clamp(MIN_BPM, MAX_BPM);
    (bpm as u32, false)
}
