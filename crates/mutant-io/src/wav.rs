//! WAV file reading and writing.
//!
//! The voice produces 16-bit mono samples, so files are written as 16-bit
//! integer PCM without any conversion.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::mono_i16(16384)
    }
}

impl WavSpec {
    /// 16-bit mono PCM at the given rate.
    pub fn mono_i16(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Layout of the file.
    pub spec: WavSpec,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate.max(1));
    Ok(WavInfo {
        spec,
        num_frames,
        duration_secs,
    })
}

/// Write 16-bit samples, one per frame, to a mono WAV file.
///
/// `spec.channels` and `spec.bits_per_sample` are forced to 1 and 16.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[i16], spec: WavSpec) -> Result<()> {
    let spec = WavSpec::mono_i16(spec.sample_rate);
    let mut writer = WavWriter::create(path, spec.into())?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read a 16-bit integer WAV file as mono samples.
///
/// Multi-channel files are mixed down by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<i16>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    if hound_spec.sample_format != SampleFormat::Int || hound_spec.bits_per_sample != 16 {
        return Err(Error::UnsupportedFormat(format!(
            "{:?} {}-bit (expected 16-bit integer PCM)",
            hound_spec.sample_format, hound_spec.bits_per_sample
        )));
    }
    let spec = WavSpec::from(hound_spec);
    let channels = usize::from(spec.channels.max(1));

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    } else {
        samples
    };

    Ok((mono, spec))
}
