// src/main.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::warn;
use rayon::prelude::*;
use walkdir::WalkDir;

use hookscan::cli::{format_json, format_json_batch, format_report, format_summary};
use hookscan::config::AnalysisConfig;
use hookscan::core::visualization::{render_hook_chart, ChartConfig};
use hookscan::core::{analyze_track, decode_audio, TrackReport};

const AUDIO_EXTENSIONS: [&str; 7] = ["flac", "wav", "mp3", "ogg", "m4a", "aac", "aiff"];

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hookscan")]
#[command(about = "Find the catchiest moments in music tracks", version)]
struct Args {
    /// Input files or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write a hook chart PNG per track into this directory
    #[arg(short, long)]
    chart: Option<PathBuf>,

    /// Analyze at most this many seconds per track
    #[arg(long)]
    max_duration: Option<f32>,

    /// Hook segment length in seconds
    #[arg(long, default_value = "10.0")]
    segment_secs: f32,

    /// FFT size for spectrum analysis
    #[arg(long, default_value = "2048")]
    fft_size: usize,

    /// Suppress per-track output, print only the summary
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output with factor breakdown
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = build_config(&args)?;
    let files = collect_audio_files(&args.inputs)?;

    if files.is_empty() {
        println!("{}", "No audio files found!".red());
        anyhow::bail!("nothing to analyze");
    }

    if let Some(dir) = &args.chart {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating chart directory {}", dir.display()))?;
    }

    if !args.quiet && matches!(args.format, OutputFormat::Text) {
        println!("Found {} audio file(s)\n", files.len());
    }

    let bar = progress_bar(files.len() as u64, args.quiet);
    let results: Vec<(PathBuf, Result<TrackReport>)> = files
        .par_iter()
        .progress_with(bar)
        .map(|path| {
            let result = process_file(path, &config, args.chart.as_deref());
            (path.clone(), result)
        })
        .collect();

    let mut reports = Vec::new();
    let mut failures = 0usize;
    for (path, result) in results {
        let display = path.display().to_string();
        match result {
            Ok(report) => reports.push((display, report)),
            Err(err) => {
                failures += 1;
                eprintln!("{} {}: {:#}", "✗".red(), display, err);
            }
        }
    }

    match args.format {
        OutputFormat::Json => {
            // Single file prints a bare object, batches print one array,
            // so stdout is always a single parseable document.
            if let [(path, report)] = reports.as_slice() {
                println!("{}", format_json(path, report)?);
            } else if !reports.is_empty() {
                println!("{}", format_json_batch(&reports)?);
            }
        }
        OutputFormat::Text => {
            if !args.quiet {
                for (path, report) in &reports {
                    println!("{}", format_report(path, report, args.verbose));
                }
            }
            if !reports.is_empty() && (reports.len() > 1 || args.quiet) {
                println!("{}", format_summary(&reports));
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} tracks failed to analyze", failures, files.len());
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let config = AnalysisConfig {
        fft_size: args.fft_size,
        segment_secs: args.segment_secs,
        max_duration_secs: args.max_duration,
        ..Default::default()
    };
    config.validate()?;
    Ok(config)
}

fn collect_audio_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            if has_audio_extension(input) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && has_audio_extension(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            anyhow::bail!("Input not found: {}", input.display());
        }
    }

    // Stable order regardless of walk order
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_audio_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tracks ({eta} remaining)")
            .unwrap()
            .progress_chars("=>-"),
    );
    bar
}

fn process_file(path: &Path, config: &AnalysisConfig, chart_dir: Option<&Path>) -> Result<TrackReport> {
    let buffer = decode_audio(path)?;
    let report = analyze_track(&buffer, config);

    if let Some(dir) = chart_dir {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("track");
        let chart_path = dir.join(format!("{}.png", stem));
        if let Err(err) = render_hook_chart(&report, &ChartConfig::default(), &chart_path) {
            warn!("chart for {} skipped: {:#}", path.display(), err);
        }
    }

    Ok(report)
}
