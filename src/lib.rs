//! HookScan - Find the catchiest moments in music tracks
//!
//! An offline audio analysis tool that scores a track's hook potential,
//! estimates its viral appeal, and points at the segments most likely to
//! carry a short clip.
//!
//! ## Features
//!
//! - **Energy profiling**: Windowed RMS envelope with peak detection
//! - **Beat tracking**: Onset envelope, tempo estimate, rhythm regularity
//! - **Spectrum statistics**: Band energies, dominant frequency, spectral centroid
//! - **Vocal presence**: Band-ratio heuristic over pre-emphasized frames
//! - **Hook identification**: Scored fixed-length segments, strongest first
//! - **Viral assessment**: Six deterministic factors and an overall rating
//!
//! ## Module Structure
//!
//! - `core` - Decoding, DSP utilities, analyses, and the track pipeline
//! - `cli` - Command-line interface and report rendering
//! - `config` - Analysis parameters and hook weights
//! - `testgen` - Synthetic signal generation for tests and fixtures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hookscan::core::TrackAnalyzer;
//!
//! let report = TrackAnalyzer::new("track.flac")?.analyze();
//!
//! if let Some(hook) = &report.hooks.best_hook {
//!     println!("Best hook at {:.0}s, score {:.2}", hook.start_time, hook.score);
//! }
//! println!("Viral potential: {:?}", report.viral.viral_potential);
//! ```
//!
//! All analyses are deterministic: the same file and configuration always
//! produce the same report.

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration
pub mod config;

// Synthetic test signals
pub mod testgen;

// Re-export commonly used types at crate root for convenience
pub use crate::config::{AnalysisConfig, ConfigError, HookWeights};
pub use crate::core::analysis::{
    BeatAnalysis, EnergyAnalysis, EnergyPeak, HookAnalysis, HookSegment, SpectralAnalysis,
    ViralAnalysis, ViralPotential, VocalAnalysis, VocalPeak,
};
pub use crate::core::{
    analyze_track, decode_audio, AnalyzerBuilder, DecodeError, SampleBuffer, TrackAnalyzer,
    TrackInfo, TrackReport,
};
