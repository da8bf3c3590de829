//! Audio analysis algorithms
//!
//! Contains the per-domain analyses that feed a track report:
//! - Energy envelope and peak detection
//! - Beat and tempo estimation
//! - Frequency spectrum statistics
//! - Vocal presence estimation
//! - Hook identification
//! - Viral potential assessment

mod beat;
mod energy;
mod hooks;
mod spectral;
mod viral;
mod vocal;

// Re-export all analysis modules
pub use beat::{analyze_beat, BeatAnalysis};
pub use energy::{analyze_energy_levels, EnergyAnalysis, EnergyPeak};
pub use hooks::{identify_hooks, HookAnalysis, HookSegment};
pub use spectral::{analyze_frequency_spectrum, SpectralAnalysis};
pub use viral::{assess_viral_potential, ViralAnalysis, ViralPotential};
pub use vocal::{analyze_vocal, VocalAnalysis, VocalPeak};
