// src/core/decoder.rs
//
// Audio decoding module producing per-channel sample buffers.
// Uses Symphonia for format-agnostic decoding.

use log::{debug, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use symphonia::core::audio::SampleBuffer as SymphoniaSampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use super::dsp::stats::peak_amplitude;

/// Decoding failures, each carrying the offending path
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open {}: {}", path.display(), source)]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to probe format of {}: {}", path.display(), source)]
    Probe {
        path: PathBuf,
        source: symphonia::core::errors::Error,
    },
    #[error("no supported audio track in {}", path.display())]
    NoTrack { path: PathBuf },
    #[error("{} does not specify a sample rate", path.display())]
    NoSampleRate { path: PathBuf },
    #[error("{} reports zero audio channels", path.display())]
    NoChannels { path: PathBuf },
    #[error("failed to create decoder for {}: {}", path.display(), source)]
    Codec {
        path: PathBuf,
        source: symphonia::core::errors::Error,
    },
    #[error("decode failure in {}: {}", path.display(), source)]
    Decode {
        path: PathBuf,
        source: symphonia::core::errors::Error,
    },
    #[error("no audio samples decoded from {}", path.display())]
    Empty { path: PathBuf },
}

/// Decoded PCM audio, stored as one buffer per channel.
///
/// Channel 0 is the analysis channel throughout the crate. Samples are
/// nominally in [-1.0, 1.0]; analyzers clamp derived values at that ceiling
/// rather than assuming it.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// One sample vector per channel, all the same length
    pub channels: Vec<Vec<f32>>,
    /// Codec name as reported by the decoder, empty for synthetic buffers
    pub codec_name: String,
    /// Container format (derived from the file extension), empty for synthetic buffers
    pub format_name: String,
}

impl SampleBuffer {
    /// Build a buffer from raw channels, e.g. synthesized test signals.
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            sample_rate,
            channels,
            codec_name: String::new(),
            format_name: String::new(),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration derived from frame count and sample rate
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Channel 0, or an empty slice for a channel-less buffer
    pub fn primary_channel(&self) -> &[f32] {
        self.channels.first().map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Copy limited to the first `max_secs` seconds (whole frames).
    pub fn truncated(&self, max_secs: f32) -> SampleBuffer {
        let max_frames = (self.sample_rate as f64 * max_secs.max(0.0) as f64) as usize;
        SampleBuffer {
            sample_rate: self.sample_rate,
            channels: self
                .channels
                .iter()
                .map(|c| c[..c.len().min(max_frames)].to_vec())
                .collect(),
            codec_name: self.codec_name.clone(),
            format_name: self.format_name.clone(),
        }
    }
}

/// Decode an audio file to per-channel floating-point samples
pub fn decode_audio(path: &Path) -> Result<SampleBuffer, DecodeError> {
    let file = File::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext.to_str().unwrap_or(""));
    }

    let meta_opts = MetadataOptions::default();
    let fmt_opts = FormatOptions::default();

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|source| DecodeError::Probe {
            path: path.to_path_buf(),
            source,
        })?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DecodeError::NoTrack {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| DecodeError::NoSampleRate {
            path: path.to_path_buf(),
        })?;

    let channel_count = track.codec_params.channels.map(|c| c.count()).unwrap_or(2);
    if channel_count == 0 {
        return Err(DecodeError::NoChannels {
            path: path.to_path_buf(),
        });
    }

    let codec_name = symphonia::default::get_codecs()
        .get_codec(track.codec_params.codec)
        .map(|desc| desc.short_name.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let format_name = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .map_err(|source| DecodeError::Codec {
            path: path.to_path_buf(),
            source,
        })?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SymphoniaSampleBuffer<f32>> = None;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(symphonia::core::errors::Error::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(source) => {
                return Err(DecodeError::Decode {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            // Skip over recoverable corrupt packets
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(source) => {
                return Err(DecodeError::Decode {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let duration = decoded.capacity() as u64;
            sample_buf = Some(SymphoniaSampleBuffer::new(duration, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(buf.samples());
        }
    }

    if interleaved.is_empty() {
        return Err(DecodeError::Empty {
            path: path.to_path_buf(),
        });
    }

    let channels = deinterleave(&interleaved, channel_count);

    let peak = peak_amplitude(channels.first().map(|c| c.as_slice()).unwrap_or(&[]));
    if peak > 1.001 {
        warn!(
            "{}: samples exceed nominal range (peak {:.3}), scores clamp at 1.0",
            path.display(),
            peak
        );
    }
    debug!(
        "decoded {}: {} Hz, {} channel(s), {} frames",
        path.display(),
        sample_rate,
        channel_count,
        interleaved.len() / channel_count
    );

    Ok(SampleBuffer {
        sample_rate,
        channels,
        codec_name,
        format_name,
    })
}

/// Split interleaved samples into per-channel buffers
fn deinterleave(interleaved: &[f32], channel_count: usize) -> Vec<Vec<f32>> {
    let frames = interleaved.len() / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];

    for frame in interleaved.chunks_exact(channel_count) {
        for (ch, &sample) in frame.iter().enumerate() {
            channels[ch].push(sample);
        }
    }

    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deinterleave_stereo() {
        let interleaved = vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3];
        let channels = deinterleave(&interleaved, 2);
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0], vec![0.1, 0.2, 0.3]);
        assert_eq!(channels[1], vec![-0.1, -0.2, -0.3]);
    }

    #[test]
    fn test_duration_from_frames() {
        let buffer = SampleBuffer::from_channels(44100, vec![vec![0.0; 22050]]);
        assert!((buffer.duration_secs() - 0.5).abs() < 1e-9);
        assert_eq!(buffer.frame_count(), 22050);
        assert_eq!(buffer.channel_count(), 1);
    }

    #[test]
    fn test_empty_buffer_is_harmless() {
        let buffer = SampleBuffer::from_channels(44100, vec![]);
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.duration_secs(), 0.0);
        assert!(buffer.primary_channel().is_empty());
    }

    #[test]
    fn test_truncated_copies_whole_frames() {
        let buffer = SampleBuffer::from_channels(1000, vec![vec![0.5; 2500], vec![-0.5; 2500]]);
        let short = buffer.truncated(1.5);
        assert_eq!(short.frame_count(), 1500);
        assert_eq!(short.channel_count(), 2);
        // Longer than the buffer leaves it unchanged
        let same = buffer.truncated(10.0);
        assert_eq!(same.frame_count(), 2500);
    }
}
