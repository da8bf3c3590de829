//! Visualization tools for audio analysis
//!
//! Contains hook chart rendering.

pub mod chart;

pub use chart::{render_hook_chart, ChartConfig};
