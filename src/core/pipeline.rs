// src/core/pipeline.rs
//
// Runs the full analysis battery over a decoded track and assembles the
// report. The four independent analyses run on two rayon branches.

use log::debug;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::core::analysis::{
    analyze_beat, analyze_energy_levels, analyze_frequency_spectrum, analyze_vocal,
    assess_viral_potential, identify_hooks, BeatAnalysis, EnergyAnalysis, HookAnalysis,
    SpectralAnalysis, ViralAnalysis, VocalAnalysis,
};
use crate::core::decoder::SampleBuffer;

/// Basic facts about the analyzed audio
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    /// Analyzed duration in seconds, after any truncation
    pub duration: f64,
    pub sample_rate: u32,
    pub channels: usize,
    /// Analyzed length in sample frames
    pub length: usize,
    pub codec_name: String,
    pub format_name: String,
}

/// Everything the analyzer knows about one track
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackReport {
    pub info: TrackInfo,
    pub energy: EnergyAnalysis,
    pub beat: BeatAnalysis,
    pub spectral: SpectralAnalysis,
    pub vocal: VocalAnalysis,
    pub hooks: HookAnalysis,
    pub viral: ViralAnalysis,
}

/// Run every analysis over a decoded buffer.
///
/// When `max_duration_secs` is set and the track is longer, only the
/// leading portion is analyzed and the report's `info` reflects the
/// truncated length.
pub fn analyze_track(buffer: &SampleBuffer, config: &AnalysisConfig) -> TrackReport {
    let limited = config.max_duration_secs.and_then(|max| {
        (buffer.duration_secs() > max as f64).then(|| {
            debug!("limiting analysis to the first {:.0}s", max);
            buffer.truncated(max)
        })
    });
    let buffer = limited.as_ref().unwrap_or(buffer);

    debug!(
        "analyzing {:.1}s of audio at {} Hz",
        buffer.duration_secs(),
        buffer.sample_rate
    );

    let ((energy, beat), (spectral, vocal)) = rayon::join(
        || {
            (
                analyze_energy_levels(buffer, config.coarse_window_secs),
                analyze_beat(buffer, config.fine_window_secs),
            )
        },
        || {
            (
                analyze_frequency_spectrum(
                    buffer,
                    config.fft_size,
                    config.spectral_frames,
                    config.window,
                ),
                analyze_vocal(buffer, config.vocal_window_secs),
            )
        },
    );

    let duration = buffer.duration_secs();
    let hooks = identify_hooks(
        &energy,
        &spectral,
        &vocal,
        duration as f32,
        config.segment_secs,
        &config.weights,
    );
    let viral = assess_viral_potential(&energy, &spectral, &beat, &vocal, &hooks);

    TrackReport {
        info: TrackInfo {
            duration,
            sample_rate: buffer.sample_rate,
            channels: buffer.channel_count(),
            length: buffer.frame_count(),
            codec_name: buffer.codec_name.clone(),
            format_name: buffer.format_name.clone(),
        },
        energy,
        beat,
        spectral,
        vocal,
        hooks,
        viral,
    }
}
