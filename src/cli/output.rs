//! Output formatting for CLI results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::analysis::ViralPotential;
use crate::core::pipeline::TrackReport;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";

/// JSON envelope around one track report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    file: &'a str,
    generated_at: DateTime<Utc>,
    version: &'static str,
    #[serde(flatten)]
    report: &'a TrackReport,
}

/// Format a track report as JSON
pub fn format_json(path: &str, report: &TrackReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        file: path,
        generated_at: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        report,
    })
}

/// Format several track reports as one JSON array
pub fn format_json_batch(reports: &[(String, TrackReport)]) -> serde_json::Result<String> {
    let generated_at = Utc::now();
    let entries: Vec<JsonReport> = reports
        .iter()
        .map(|(path, report)| JsonReport {
            file: path,
            generated_at,
            version: env!("CARGO_PKG_VERSION"),
            report,
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Format a track report for terminal output
pub fn format_report(path: &str, report: &TrackReport, verbose: bool) -> String {
    let mut output = String::new();

    let potential = report.viral.viral_potential;
    let potential_color = match potential {
        ViralPotential::High => GREEN,
        ViralPotential::Medium => YELLOW,
        ViralPotential::Low => GRAY,
    };

    output.push_str(&format!(
        "{}{} {}{}{}\n",
        potential_color,
        potential.symbol(),
        BOLD,
        path,
        RESET,
    ));
    output.push_str(&format!(
        "  {} (viral score: {:.0}%)\n",
        potential.description(),
        report.viral.overall_viral_score * 100.0
    ));

    let tempo_note = if report.beat.tempo_is_fallback {
        " assumed"
    } else {
        ""
    };
    output.push_str(&format!(
        "  {}{} Hz | {} ch | {:.1}s | {} bpm{}{}\n",
        DIM,
        report.info.sample_rate,
        report.info.channels,
        report.info.duration,
        report.beat.bpm,
        tempo_note,
        RESET
    ));

    if let Some(hook) = &report.hooks.best_hook {
        output.push_str(&format!(
            "\n  Best hook: {:.0}s - {:.0}s (score {:.2})\n",
            hook.start_time, hook.end_time, hook.score
        ));
    }

    if !report.hooks.segments.is_empty() {
        output.push_str("\n  Top segments:\n");
        for segment in report.hooks.segments.iter().take(3) {
            output.push_str(&format!(
                "    {:>5.0}s - {:>5.0}s  score {:.2}  {}energy {:.2} | freq {:.2} | vocal {:.2} | position {:.2}{}\n",
                segment.start_time,
                segment.end_time,
                segment.score,
                DIM,
                segment.energy,
                segment.frequency,
                segment.vocal,
                segment.position,
                RESET
            ));
        }
    }

    if verbose {
        output.push_str("\n  Factors:\n");
        for (name, value) in [
            ("catchiness", report.viral.catchiness),
            ("memorability", report.viral.memorability),
            ("shareability", report.viral.shareability),
            ("danceability", report.viral.danceability),
            ("emotional impact", report.viral.emotional_impact),
            ("uniqueness", report.viral.uniqueness),
        ] {
            output.push_str(&format!("    {:<17} {:.2}\n", name, value));
        }

        output.push_str("\n  Technical Details:\n");
        output.push_str(&format!(
            "    Dominant Frequency: {:.0} Hz\n",
            report.spectral.dominant_frequency
        ));
        output.push_str(&format!(
            "    Spectral Centroid: {:.0} Hz\n",
            report.spectral.spectral_centroid
        ));
        output.push_str(&format!(
            "    Band Energy (bass/mid/high): {:.2} / {:.2} / {:.2}\n",
            report.spectral.bass_energy, report.spectral.mid_energy, report.spectral.high_energy
        ));
        output.push_str(&format!(
            "    Vocal Presence: {:.2} (clarity {:.2}, melodicity {:.2})\n",
            report.vocal.presence, report.vocal.clarity, report.vocal.melodicity
        ));
        output.push_str(&format!(
            "    Beat Strength: {:.2} (consistency {:.2})\n",
            report.beat.strength, report.beat.consistency
        ));
        output.push_str(&format!(
            "    Energy: avg {:.2}, peak {:.2}, dynamic range {:.2}\n",
            report.energy.average, report.energy.max, report.energy.dynamic_range
        ));
    }

    output
}

/// Format a summary for multiple tracks
pub fn format_summary(reports: &[(String, TrackReport)]) -> String {
    let mut output = String::new();

    let high = count_potential(reports, ViralPotential::High);
    let medium = count_potential(reports, ViralPotential::Medium);
    let low = count_potential(reports, ViralPotential::Low);

    output.push_str(&format!("\n{}Summary:{}\n", BOLD, RESET));
    output.push_str(&format!("  {} tracks analyzed\n", reports.len()));

    if high > 0 {
        output.push_str(&format!("  {}✓ {} high potential{}\n", GREEN, high, RESET));
    }
    if medium > 0 {
        output.push_str(&format!("  {}? {} medium potential{}\n", YELLOW, medium, RESET));
    }
    if low > 0 {
        output.push_str(&format!("  {}✗ {} low potential{}\n", GRAY, low, RESET));
    }

    let best = reports.iter().max_by(|a, b| {
        a.1.viral
            .overall_viral_score
            .total_cmp(&b.1.viral.overall_viral_score)
    });
    if let Some((path, report)) = best {
        output.push_str(&format!(
            "  Top track: {} ({:.0}%)\n",
            path,
            report.viral.overall_viral_score * 100.0
        ));
    }

    output
}

fn count_potential(reports: &[(String, TrackReport)], potential: ViralPotential) -> usize {
    reports
        .iter()
        .filter(|(_, r)| r.viral.viral_potential == potential)
        .count()
}
