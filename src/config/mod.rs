//! Configuration module for hookscan
//!
//! All analysis parameters live in [`AnalysisConfig`]. The defaults are the
//! reference values the scoring model was tuned with; overrides are validated
//! before they reach the pipeline.

use thiserror::Error;

use crate::core::dsp::WindowType;

/// Invalid analysis parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fft_size must be non-zero")]
    ZeroFftSize,
    #[error("spectral_frames must be non-zero")]
    ZeroSpectralFrames,
    #[error("envelope windows must be positive, got {0}")]
    NonPositiveWindow(f32),
    #[error("segment_secs must be positive, got {0}")]
    NonPositiveSegment(f32),
    #[error("max_duration_secs must be positive, got {0}")]
    NonPositiveMaxDuration(f32),
    #[error("hook weights must sum to 1.0, got {0}")]
    UnbalancedWeights(f32),
}

/// Weights combining the per-segment hook sub-scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookWeights {
    pub energy: f32,
    pub frequency: f32,
    pub vocal: f32,
    pub position: f32,
}

impl Default for HookWeights {
    fn default() -> Self {
        Self {
            energy: 0.30,
            frequency: 0.25,
            vocal: 0.25,
            position: 0.20,
        }
    }
}

impl HookWeights {
    pub fn sum(&self) -> f32 {
        self.energy + self.frequency + self.vocal + self.position
    }
}

/// Tuning knobs for the analysis pipeline
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Transform length for spectral frames
    pub fft_size: usize,
    /// Number of evenly spaced spectral frames across the track
    pub spectral_frames: usize,
    /// Window applied before each transform
    pub window: WindowType,
    /// Coarse RMS envelope window in seconds (hook scoring)
    pub coarse_window_secs: f32,
    /// Fine mean-amplitude envelope window in seconds (beat detection)
    pub fine_window_secs: f32,
    /// Vocal band analysis window in seconds
    pub vocal_window_secs: f32,
    /// Hook candidate segment length in seconds
    pub segment_secs: f32,
    /// Hook sub-score weights
    pub weights: HookWeights,
    /// Analyze at most this many seconds from the start of the track
    pub max_duration_secs: Option<f32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            spectral_frames: 100,
            window: WindowType::Hann,
            coarse_window_secs: 0.5,
            fine_window_secs: 0.1,
            vocal_window_secs: 1.0,
            segment_secs: 10.0,
            weights: HookWeights::default(),
            max_duration_secs: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fft_size == 0 {
            return Err(ConfigError::ZeroFftSize);
        }
        if self.spectral_frames == 0 {
            return Err(ConfigError::ZeroSpectralFrames);
        }
        for window in [
            self.coarse_window_secs,
            self.fine_window_secs,
            self.vocal_window_secs,
        ] {
            if window <= 0.0 {
                return Err(ConfigError::NonPositiveWindow(window));
            }
        }
        if self.segment_secs <= 0.0 {
            return Err(ConfigError::NonPositiveSegment(self.segment_secs));
        }
        if let Some(max) = self.max_duration_secs {
            if max <= 0.0 {
                return Err(ConfigError::NonPositiveMaxDuration(max));
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::UnbalancedWeights(sum));
        }
        Ok(())
    }
}
