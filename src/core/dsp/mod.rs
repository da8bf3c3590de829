//! DSP utilities shared by the analysis modules
//!
//! FFT magnitude spectra, window functions, a pre-emphasis filter, and
//! the small statistics helpers the analyses are built from.

pub mod fft;
pub mod filters;
pub mod stats;
pub mod windows;

pub use fft::FftProcessor;
pub use windows::{create_window, WindowType};
