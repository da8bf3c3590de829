// src/core/visualization/chart.rs
//
// Hook chart rendering: segment score bars with the energy envelope
// drawn on top and the best hook outlined.

use anyhow::Result;
use image::{ImageBuffer, Rgb};
use std::path::Path;

use crate::core::pipeline::TrackReport;

const ENVELOPE_COLOR: Rgb<u8> = Rgb([235, 235, 235]);
const BEST_HOOK_COLOR: Rgb<u8> = Rgb([250, 210, 80]);

/// Hook chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 400,
            background: Rgb([18, 18, 24]),
        }
    }
}

/// Render the hook chart as a PNG
pub fn render_hook_chart(
    report: &TrackReport,
    config: &ChartConfig,
    output_path: &Path,
) -> Result<()> {
    let duration = report.info.duration as f32;
    if report.hooks.segments.is_empty() || report.energy.levels.is_empty() || duration <= 0.0 {
        anyhow::bail!("Track too short for chart rendering");
    }

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(config.width, config.height, config.background);
    let width = config.width;
    let height = config.height;

    // Segment score bars; segments tile the track so draw order is free
    for segment in &report.hooks.segments {
        let x0 = (segment.start_time / duration * width as f32) as u32;
        let x1 = ((segment.end_time / duration * width as f32) as u32).min(width);
        let bar_top = ((1.0 - segment.score.clamp(0.0, 1.0)) * (height - 1) as f32) as u32;
        let color = score_color(segment.score);

        // 1px gap between bars
        for x in x0..x1.saturating_sub(1) {
            for y in bar_top..height {
                img.put_pixel(x, y, color);
            }
        }
    }

    // Energy envelope polyline drawn over the bars
    let levels = &report.energy.levels;
    let x_scale = levels.len() as f32 / width as f32;
    for x in 0..width {
        let idx = ((x as f32 * x_scale) as usize).min(levels.len() - 1);
        let y = ((1.0 - levels[idx].clamp(0.0, 1.0)) * (height - 1) as f32) as u32;
        img.put_pixel(x, y, ENVELOPE_COLOR);
        if y + 1 < height {
            img.put_pixel(x, y + 1, ENVELOPE_COLOR);
        }
    }

    // Outline the best hook with full-height edge markers
    if let Some(best) = &report.hooks.best_hook {
        let x0 = (best.start_time / duration * width as f32) as u32;
        let x1 = ((best.end_time / duration * width as f32) as u32).min(width);
        for x in [x0, x1.saturating_sub(1)] {
            if x < width {
                for y in 0..height {
                    img.put_pixel(x, y, BEST_HOOK_COLOR);
                }
            }
        }
    }

    img.save(output_path)?;
    Ok(())
}

fn score_color(score: f32) -> Rgb<u8> {
    // Cold-to-warm ramp: low scores blue, high scores orange
    let v = score.clamp(0.0, 1.0);

    let r = (40.0 + v * (250.0 - 40.0)) as u8;
    let g = (90.0 + v * (170.0 - 90.0)) as u8;
    let b = (170.0 - v * 130.0) as u8;

    Rgb([r, g, b])
}
