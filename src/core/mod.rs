//! Core decoding, analysis, and pipeline modules

pub mod analysis;
pub mod analyzer;
pub mod decoder;
pub mod dsp;
pub mod pipeline;
pub mod visualization;

pub use analyzer::{AnalyzerBuilder, TrackAnalyzer};
pub use decoder::{decode_audio, DecodeError, SampleBuffer};
pub use pipeline::{analyze_track, TrackInfo, TrackReport};
