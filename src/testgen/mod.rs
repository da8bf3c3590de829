// src/testgen/mod.rs
//
// Synthetic signal generation for tests and fixtures. Every generator is
// deterministic so fixtures can be rebuilt byte for byte.

use std::f32::consts::PI;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::core::decoder::SampleBuffer;

/// All-zero mono buffer
pub fn silence(sample_rate: u32, secs: f32) -> SampleBuffer {
    let count = (sample_rate as f32 * secs) as usize;
    SampleBuffer::from_channels(sample_rate, vec![vec![0.0; count]])
}

/// Pure sine tone
pub fn sine(sample_rate: u32, freq: f32, amplitude: f32, secs: f32) -> SampleBuffer {
    let count = (sample_rate as f32 * secs) as usize;
    let samples = (0..count)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin() * amplitude)
        .collect();
    SampleBuffer::from_channels(sample_rate, vec![samples])
}

/// Constant-amplitude pulses at a fixed interval, silence in between.
///
/// Pulses start at 0, `interval_secs`, `2 * interval_secs`, and so on;
/// each lasts `pulse_secs`.
pub fn pulse_train(
    sample_rate: u32,
    interval_secs: f32,
    pulse_secs: f32,
    amplitude: f32,
    secs: f32,
) -> SampleBuffer {
    let count = (sample_rate as f32 * secs) as usize;
    let interval = (sample_rate as f32 * interval_secs) as usize;
    let pulse_len = (sample_rate as f32 * pulse_secs) as usize;
    let mut samples = vec![0.0f32; count];

    if interval > 0 {
        let mut start = 0usize;
        while start < count {
            let end = (start + pulse_len).min(count);
            for sample in &mut samples[start..end] {
                *sample = amplitude;
            }
            start += interval;
        }
    }

    SampleBuffer::from_channels(sample_rate, vec![samples])
}

/// Linear frequency sweep with continuous phase
pub fn sweep(
    sample_rate: u32,
    start_hz: f32,
    end_hz: f32,
    amplitude: f32,
    secs: f32,
) -> SampleBuffer {
    let count = (sample_rate as f32 * secs) as usize;
    let mut samples = Vec::with_capacity(count);
    let mut phase = 0.0f32;

    for i in 0..count {
        let progress = if count > 1 {
            i as f32 / (count - 1) as f32
        } else {
            0.0
        };
        let freq = start_hz + (end_hz - start_hz) * progress;
        phase += 2.0 * PI * freq / sample_rate as f32;
        samples.push(phase.sin() * amplitude);
    }

    SampleBuffer::from_channels(sample_rate, vec![samples])
}

/// Sample-wise sum of several buffers, clamped to [-1, 1].
///
/// All inputs must share a sample rate; the first buffer provides it.
/// The result is as long as the longest input.
pub fn mix(buffers: &[&SampleBuffer]) -> SampleBuffer {
    let sample_rate = buffers.first().map_or(0, |b| b.sample_rate);
    let count = buffers.iter().map(|b| b.frame_count()).max().unwrap_or(0);
    let mut samples = vec![0.0f32; count];

    for buffer in buffers {
        for (slot, &sample) in samples.iter_mut().zip(buffer.primary_channel()) {
            *slot += sample;
        }
    }
    for sample in &mut samples {
        *sample = sample.clamp(-1.0, 1.0);
    }

    SampleBuffer::from_channels(sample_rate, vec![samples])
}

/// Write a buffer as a 16-bit PCM WAV file
pub fn write_wav(buffer: &SampleBuffer, path: &Path) -> hound::Result<()> {
    let spec = WavSpec {
        channels: buffer.channel_count() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;

    for i in 0..buffer.frame_count() {
        for channel in &buffer.channels {
            let sample = (channel[i].clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()
}
