// tests/analysis_test.rs
// End-to-end analysis over synthetic tracks with known properties.

mod test_utils;

use hookscan::testgen;
use hookscan::{analyze_track, AnalysisConfig, TrackAnalyzer, ViralPotential};
use test_utils::{catchy_track, FixtureDir};

#[test]
fn test_analysis_is_deterministic() {
    let track = catchy_track(8000, 30.0);
    let config = AnalysisConfig::default();

    let first = analyze_track(&track, &config);
    let second = analyze_track(&track, &config);

    assert_eq!(first, second);
}

#[test]
fn test_steady_pulse_sets_the_tempo() {
    // Full-window pulses every half second, 120 BPM
    let track = testgen::pulse_train(8000, 0.5, 0.1, 0.9, 20.0);
    let report = analyze_track(&track, &AnalysisConfig::default());

    assert_eq!(report.beat.bpm, 120);
    assert!(!report.beat.tempo_is_fallback);
    assert!(report.beat.has_strong_beat);
    assert!(report.beat.is_danceable);
    assert!(
        report.viral.danceability > 0.7,
        "regular pulse in the dance tempo range scored {}",
        report.viral.danceability
    );
}

#[test]
fn test_pulsed_energy_varies_more_than_a_tone() {
    // Frame energies swing between pulse and gap, a steady tone barely moves
    let pulsed = analyze_track(
        &testgen::pulse_train(8000, 0.5, 0.1, 0.9, 15.0),
        &AnalysisConfig::default(),
    );
    let tone = analyze_track(
        &testgen::sine(8000, 440.0, 0.5, 15.0),
        &AnalysisConfig::default(),
    );

    assert!(
        pulsed.spectral.frequency_variation > tone.spectral.frequency_variation,
        "pulsed {} vs tone {}",
        pulsed.spectral.frequency_variation,
        tone.spectral.frequency_variation
    );
}

#[test]
fn test_sweep_sits_higher_in_the_spectrum() {
    let sweep = analyze_track(
        &testgen::sweep(8000, 200.0, 3500.0, 0.5, 15.0),
        &AnalysisConfig::default(),
    );
    let tone = analyze_track(
        &testgen::sine(8000, 440.0, 0.5, 15.0),
        &AnalysisConfig::default(),
    );

    assert!(
        sweep.spectral.spectral_centroid > tone.spectral.spectral_centroid,
        "sweep centroid {} vs tone centroid {}",
        sweep.spectral.spectral_centroid,
        tone.spectral.spectral_centroid
    );
}

#[test]
fn test_boosted_middle_hosts_the_best_hook() {
    let report = analyze_track(&catchy_track(8000, 30.0), &AnalysisConfig::default());

    let best = report.hooks.best_hook.as_ref().unwrap();
    assert_eq!(best.start_time, 10.0);
    assert_eq!(best.end_time, 20.0);
}

#[test]
fn test_vocal_band_tone_reads_as_vocal() {
    let voiced = analyze_track(
        &testgen::sine(8000, 2000.0, 0.4, 8.0),
        &AnalysisConfig::default(),
    );
    let bass_only = analyze_track(
        &testgen::sine(8000, 200.0, 0.4, 8.0),
        &AnalysisConfig::default(),
    );

    assert!(voiced.vocal.has_prominent_vocals);
    assert!(voiced.vocal.presence > 0.9);
    assert!(!bass_only.vocal.has_prominent_vocals);
    assert!(bass_only.vocal.presence < 0.2);
}

#[test]
fn test_builder_overrides_reach_the_report() {
    let fixtures = FixtureDir::new("maxdur");
    let path = fixtures.wav("long.wav", &catchy_track(8000, 12.0));

    let analyzer = TrackAnalyzer::builder()
        .max_duration_secs(5.0)
        .segment_secs(2.5)
        .build(&path)
        .unwrap();
    let report = analyzer.analyze();

    assert_eq!(report.info.length, 40000);
    assert!((report.info.duration - 5.0).abs() < 1e-6);
    assert_eq!(report.hooks.segments.len(), 2);

    let mut starts: Vec<f32> = report.hooks.segments.iter().map(|s| s.start_time).collect();
    starts.sort_by(f32::total_cmp);
    assert_eq!(starts, vec![0.0, 2.5]);
}

#[test]
fn test_wav_fixture_roundtrip_through_analyzer() {
    let fixtures = FixtureDir::new("roundtrip");
    let path = fixtures.wav("track.wav", &catchy_track(8000, 12.0));

    let analyzer = TrackAnalyzer::new(&path).unwrap();
    let report = analyzer.analyze();

    assert_eq!(analyzer.path(), path.as_path());
    assert_eq!(report.info.sample_rate, 8000);
    assert_eq!(report.info.channels, 1);
    assert!((report.info.duration - 12.0).abs() < 0.05);
    assert!(report.viral.overall_viral_score > 0.0);
}

#[test]
fn test_scores_stay_in_unit_range() {
    let report = analyze_track(&catchy_track(8000, 30.0), &AnalysisConfig::default());

    let factors = [
        report.viral.catchiness,
        report.viral.memorability,
        report.viral.shareability,
        report.viral.danceability,
        report.viral.emotional_impact,
        report.viral.uniqueness,
        report.viral.overall_viral_score,
    ];
    for factor in factors {
        assert!((0.0..=1.0).contains(&factor), "factor out of range: {factor}");
    }

    for segment in &report.hooks.segments {
        assert!((0.0..=1.0).contains(&segment.score));
    }
    for level in &report.energy.levels {
        assert!((0.0..=1.0).contains(level));
    }
    assert!((0.0..=1.0).contains(&report.vocal.presence));
    assert!((0.0..=1.0).contains(&report.vocal.clarity));
    assert!((0.0..=1.0).contains(&report.vocal.melodicity));
    assert!((0.0..=1.0).contains(&report.beat.consistency));
}

#[test]
fn test_segments_tile_the_track() {
    let report = analyze_track(&testgen::silence(8000, 25.0), &AnalysisConfig::default());

    let segments = &report.hooks.segments;
    assert_eq!(segments.len(), 3);

    let mut starts: Vec<f32> = segments.iter().map(|s| s.start_time).collect();
    starts.sort_by(f32::total_cmp);
    assert_eq!(starts, vec![0.0, 10.0, 20.0]);

    let last_end = segments
        .iter()
        .map(|s| s.end_time)
        .fold(0.0f32, f32::max);
    assert_eq!(last_end, 25.0);

    assert_eq!(report.energy.levels.len(), 50);
    assert_eq!(report.spectral.frame_energies.len(), 100);
}

#[test]
fn test_silence_scores_near_zero() {
    let report = analyze_track(&testgen::silence(8000, 15.0), &AnalysisConfig::default());

    assert_eq!(report.viral.viral_potential, ViralPotential::Low);
    assert!(report.viral.overall_viral_score < 0.35);
    assert_eq!(report.viral.danceability, 0.0);
    assert_eq!(report.energy.average, 0.0);
    assert!(report.beat.tempo_is_fallback);
    // 120 falls inside the dance range but a fallback never qualifies
    assert!(!report.beat.is_danceable);
    assert!(!report.vocal.has_prominent_vocals);
}

#[test]
fn test_louder_track_has_more_energy() {
    let quiet = analyze_track(
        &testgen::sine(8000, 440.0, 0.2, 10.0),
        &AnalysisConfig::default(),
    );
    let loud = analyze_track(
        &testgen::sine(8000, 440.0, 0.7, 10.0),
        &AnalysisConfig::default(),
    );

    assert!(loud.energy.average > quiet.energy.average);
    assert!(loud.energy.max > quiet.energy.max);
}
