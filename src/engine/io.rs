//! Capture and preview file I/O
//!
//! Captures are read either as headerless signed 8-bit mono PCM (the format
//! `sox ... -b 8 -e signed-integer` and `ffmpeg -f s8` produce) or as WAV.
//! WAV input is reduced to its first channel and rescaled to 8 bits.
//!
//! Previews are square waves rendered from a note list and written as 16-bit
//! mono WAV.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::info;

use crate::decode::Note;
use crate::engine::buffer::{SampleBuffer, I8_FULL_SCALE};
use crate::error::{PulseError, Result};

/// Import a capture
///
/// Files with a `.wav` extension are parsed as WAV; everything else is read
/// as raw signed 8-bit PCM.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If a WAV file cannot be parsed
/// * `EmptyAudio` - If the capture holds no samples
pub fn import_samples(path: &Path) -> Result<SampleBuffer> {
    if !path.exists() {
        return Err(PulseError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("wav"));

    let buffer = if is_wav {
        import_wav(path)?
    } else {
        import_raw_pcm(path)?
    };

    if buffer.is_empty() {
        return Err(PulseError::EmptyAudio);
    }

    info!("Loaded {} samples from {}", buffer.len(), path.display());
    Ok(buffer)
}

/// Render notes into a square-wave preview and write it as 16-bit mono WAV
///
/// `amplitude` is a fraction of full scale. Returns the preview length in
/// seconds.
pub fn export_preview(
    notes: &[Note],
    path: &Path,
    sample_rate: u32,
    amplitude: f32,
) -> Result<f64> {
    let samples = render_preview(notes, sample_rate, amplitude);

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(hound_to_io)?;
    for sample in &samples {
        writer.write_sample(*sample).map_err(hound_to_io)?;
    }
    writer.finalize().map_err(hound_to_io)?;

    let duration_secs = samples.len() as f64 / f64::from(sample_rate);
    info!("Wrote preview {} ({:.2}s)", path.display(), duration_secs);
    Ok(duration_secs)
}

/// Synthesize the square-wave preview of `notes` as 16-bit samples
///
/// Each note yields `sample_rate * duration_ms / 1000` samples: high for the
/// first half of every `sample_rate / frequency_hz` period, low for the
/// second half. Silent notes yield zeros.
pub fn render_preview(notes: &[Note], sample_rate: u32, amplitude: f32) -> Vec<i16> {
    let high = (f32::from(i16::MAX) * amplitude.clamp(0.0, 1.0)) as i16;
    let low = -high;
    let mut samples = Vec::new();

    for note in notes {
        let num_samples =
            (u64::from(sample_rate) * u64::from(note.duration_ms) / 1000) as usize;

        if note.is_silence() || num_samples == 0 {
            samples.resize(samples.len() + num_samples, 0);
            continue;
        }

        let period = f64::from(sample_rate) / f64::from(note.frequency_hz);
        let half_period = period / 2.0;
        samples.extend((0..num_samples).map(|i| {
            if (i as f64) % period < half_period {
                high
            } else {
                low
            }
        }));
    }

    samples
}

/// Generate a signed 8-bit square wave
///
/// Same waveform as the preview renderer: high first, `amplitude` peak.
/// Useful for feeding known tones through the decoder.
pub fn generate_square_tone(
    frequency: f64,
    duration_secs: f64,
    sample_rate: u32,
    amplitude: i8,
) -> Vec<i8> {
    let num_samples = (duration_secs * f64::from(sample_rate)) as usize;
    if frequency <= 0.0 {
        return vec![0; num_samples];
    }

    let period = f64::from(sample_rate) / frequency;
    let half_period = period / 2.0;
    let high = amplitude.saturating_abs();
    let low = -high;

    (0..num_samples)
        .map(|i| if (i as f64) % period < half_period { high } else { low })
        .collect()
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn import_raw_pcm(path: &Path) -> Result<SampleBuffer> {
    let bytes = std::fs::read(path)?;
    let samples = bytes.into_iter().map(|b| b as i8).collect();
    Ok(SampleBuffer::raw(samples))
}

fn import_wav(path: &Path) -> Result<SampleBuffer> {
    let reader = WavReader::open(path).map_err(|e| PulseError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(PulseError::UnsupportedFormat {
            format: "WAV file without channels".to_string(),
        });
    }
    if spec.channels > 1 {
        info!("{}-channel WAV, decoding the first channel", spec.channels);
    }

    let samples = read_first_channel_as_i8(reader, spec)?;
    Ok(SampleBuffer::with_rate(samples, spec.sample_rate))
}

/// Read the first channel of a WAV stream, rescaled to signed 8-bit
fn read_first_channel_as_i8<R: std::io::Read>(
    mut reader: WavReader<R>,
    spec: WavSpec,
) -> Result<Vec<i8>> {
    let channels = usize::from(spec.channels);

    match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .step_by(channels)
            .map(|s| s.map(|v| (v * I8_FULL_SCALE).round().clamp(-128.0, 127.0) as i8))
            .collect::<std::result::Result<Vec<i8>, _>>()
            .map_err(|e| PulseError::InvalidAudio {
                reason: format!("Failed to read float samples: {}", e),
                source: Some(Box::new(e)),
            }),
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .step_by(channels)
            .collect::<std::result::Result<Vec<i8>, _>>()
            .map_err(|e| PulseError::InvalidAudio {
                reason: format!("Failed to read 8-bit samples: {}", e),
                source: Some(Box::new(e)),
            }),
        (SampleFormat::Int, bits @ 9..=32) => {
            let shift = u32::from(bits) - 8;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|v| (v >> shift) as i8))
                .collect::<std::result::Result<Vec<i8>, _>>()
                .map_err(|e| PulseError::InvalidAudio {
                    reason: format!("Failed to read {}-bit samples: {}", bits, e),
                    source: Some(Box::new(e)),
                })
        }
        (format, bits) => Err(PulseError::UnsupportedFormat {
            format: format!("{}-bit {:?} WAV", bits, format),
        }),
    }
}

fn hound_to_io(e: hound::Error) -> PulseError {
    match e {
        hound::Error::IoError(io) => PulseError::Io(io),
        other => PulseError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
