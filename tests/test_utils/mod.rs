use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use hookscan::core::SampleBuffer;
use hookscan::testgen;

/// Scratch directory for one test's fixture files, removed on drop.
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    pub fn new(label: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "hookscan_{}_{}",
            label,
            std::process::id()
        ));
        std::fs::create_dir_all(&root).expect("create fixture dir");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write a synthetic buffer as a WAV file inside the fixture dir.
    pub fn wav(&self, name: &str, buffer: &SampleBuffer) -> PathBuf {
        let path = self.root.join(name);
        testgen::write_wav(buffer, &path).expect("write fixture wav");
        path
    }
}

impl Drop for FixtureDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// A short track built to score well: a steady 120 BPM pulse, a bass
/// line, vocal-band content, and a louder stretch in the middle third.
pub fn catchy_track(sample_rate: u32, secs: f32) -> SampleBuffer {
    let pulses = testgen::pulse_train(sample_rate, 0.5, 0.05, 0.6, secs);
    let bass = testgen::sine(sample_rate, 150.0, 0.3, secs);
    let voice = testgen::sine(sample_rate, 2000.0, 0.25, secs);
    let mut track = testgen::mix(&[&pulses, &bass, &voice]);

    let len = track.channels[0].len();
    for sample in &mut track.channels[0][len / 3..2 * len / 3] {
        *sample = (*sample * 1.5).clamp(-1.0, 1.0);
    }
    track
}

pub fn run_hookscan(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hookscan"))
        .args(args)
        .output()
        .expect("run hookscan binary")
}

pub fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
