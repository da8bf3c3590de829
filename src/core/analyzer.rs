// src/core/analyzer.rs
//
// High-level track analysis API with builder pattern.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::decoder::{decode_audio, SampleBuffer};
use super::pipeline::{analyze_track, TrackReport};
use crate::config::{AnalysisConfig, HookWeights};
use crate::core::dsp::windows::WindowType;

/// Builder for TrackAnalyzer configuration
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn fft_size(mut self, size: usize) -> Self {
        self.config.fft_size = size;
        self
    }

    pub fn spectral_frames(mut self, frames: usize) -> Self {
        self.config.spectral_frames = frames;
        self
    }

    pub fn window(mut self, window: WindowType) -> Self {
        self.config.window = window;
        self
    }

    pub fn segment_secs(mut self, secs: f32) -> Self {
        self.config.segment_secs = secs;
        self
    }

    pub fn max_duration_secs(mut self, secs: f32) -> Self {
        self.config.max_duration_secs = Some(secs);
        self
    }

    pub fn weights(mut self, weights: HookWeights) -> Self {
        self.config.weights = weights;
        self
    }

    pub fn build<P: AsRef<Path>>(self, path: P) -> Result<TrackAnalyzer> {
        self.config.validate()?;
        let audio = decode_audio(path.as_ref())?;
        Ok(TrackAnalyzer {
            path: path.as_ref().to_path_buf(),
            audio,
            config: self.config,
        })
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main track analyzer with fluent API
pub struct TrackAnalyzer {
    path: PathBuf,
    audio: SampleBuffer,
    config: AnalysisConfig,
}

impl TrackAnalyzer {
    /// Create analyzer with default configuration
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        AnalyzerBuilder::new().build(path)
    }

    /// Create analyzer with custom configuration
    pub fn with_config<P: AsRef<Path>>(path: P, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let audio = decode_audio(path.as_ref())?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            audio,
            config,
        })
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Run the full analysis battery
    pub fn analyze(&self) -> TrackReport {
        analyze_track(&self.audio, &self.config)
    }

    /// Get raw audio data
    pub fn audio_data(&self) -> &SampleBuffer {
        &self.audio
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the hook score chart as a PNG
    pub fn save_hook_chart(&self, report: &TrackReport, output_path: &Path) -> Result<()> {
        use super::visualization::chart::{render_hook_chart, ChartConfig};

        render_hook_chart(report, &ChartConfig::default(), output_path)
    }
}
