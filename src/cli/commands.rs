//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command. Rendered output goes to
//! stdout or the `--output` file; progress goes through the logger.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{info, warn};

use super::DecodeArgs;
use crate::config::DecodeConfig;
use crate::decode::{decode_with_stats, total_duration_ms, Note};
use crate::engine::{export_preview, import_samples};
use crate::output::{decode_frames, render, OutputFormat};

/// How a command finished when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The capture decoded to an empty note list
    NothingDecoded,
}

/// Build the decoder configuration for `args`
///
/// Precedence: built-in defaults < config file < WAV header rate < flags.
pub fn resolve_config(args: &DecodeArgs, header_rate: Option<u32>) -> Result<DecodeConfig> {
    let mut config = match &args.config {
        Some(path) => DecodeConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DecodeConfig::default(),
    };

    if let Some(rate) = header_rate {
        config.sample_rate = rate;
    }
    if let Some(rate) = args.sample_rate {
        config.sample_rate = rate;
    }
    if let Some(speed) = args.speed {
        config.speed_multiplier = speed;
    }
    if let Some(base_freq) = args.base_freq {
        config.base_freq = base_freq;
    }
    if let Some(method) = args.method {
        config.method = method;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(window_size) = args.window_size {
        config.window_size = window_size;
    }
    if let Some(min_cycles) = args.min_cycles {
        config.min_cycles = min_cycles;
    }
    if let Some(smooth) = args.smooth {
        config.smooth_ms = smooth;
    }
    if args.no_merge {
        config.merge = false;
    }

    config.validate()?;
    Ok(config)
}

/// Decode a capture and write the notes in the requested format.
pub fn decode(args: &DecodeArgs) -> Result<Outcome> {
    if args.format.is_binary() && args.output.is_none() {
        bail!("--output is required for the binary format");
    }

    // Read the config file before the capture so bad settings fail fast
    resolve_config(args, None)?;

    info!("Loading {}...", args.input.display());
    let buffer = import_samples(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let config = resolve_config(args, buffer.sample_rate)?;

    let decoded = decode_with_stats(&buffer.samples, &config)?;
    if decoded.is_empty() {
        warn!("No notes extracted!");
        return Ok(Outcome::NothingDecoded);
    }

    let notes = decoded.notes;
    eprintln!(
        "Result: {} notes, {:.2}s total duration",
        notes.len(),
        total_duration_ms(&notes) as f64 / 1000.0
    );

    if let Some(preview_path) = &args.preview {
        info!("Generating preview WAV...");
        let secs = export_preview(&notes, preview_path, config.sample_rate, args.amplitude)
            .with_context(|| format!("Failed to write preview {}", preview_path.display()))?;
        eprintln!("Wrote {} ({:.2}s)", preview_path.display(), secs);
    }

    write_notes(&notes, args.format, args.output.as_deref())?;
    Ok(Outcome::Done)
}

/// Print the notes of a binary frame file.
pub fn show_frames(input: &Path, format: OutputFormat) -> Result<Outcome> {
    if format.is_binary() {
        bail!("frames can only be printed as arduino or json");
    }

    let notes = read_frames(input)?;
    if notes.is_empty() {
        warn!("{} holds no frames", input.display());
        return Ok(Outcome::NothingDecoded);
    }

    write_notes(&notes, format, None)?;
    Ok(Outcome::Done)
}

/// Render a binary frame file to a WAV preview.
pub fn preview(input: &Path, output: &Path, sample_rate: u32, amplitude: f32) -> Result<Outcome> {
    if sample_rate == 0 {
        bail!("--sample-rate must be greater than 0");
    }

    let notes = read_frames(input)?;
    let secs = export_preview(&notes, output, sample_rate, amplitude)
        .with_context(|| format!("Failed to write preview {}", output.display()))?;
    eprintln!("Wrote {} ({:.2}s)", output.display(), secs);

    Ok(Outcome::Done)
}

/// Print the default configuration.
pub fn print_config() -> Result<Outcome> {
    let json = serde_json::to_string_pretty(&DecodeConfig::default())?;
    println!("{}", json);
    Ok(Outcome::Done)
}

fn read_frames(input: &Path) -> Result<Vec<Note>> {
    let data =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let notes = decode_frames(&data)
        .with_context(|| format!("Failed to parse frames in {}", input.display()))?;
    Ok(notes)
}

fn write_notes(notes: &[Note], format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let data = render(notes, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &data)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} ({} bytes)", path.display(), data.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinarizeMethod;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args_for(input: PathBuf) -> DecodeArgs {
        DecodeArgs {
            input,
            amplitude: 0.3,
            ..DecodeArgs::default()
        }
    }

    #[test]
    fn test_resolve_config_precedence() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("decode.json");
        std::fs::write(
            &config_path,
            r#"{ "sample_rate": 22050, "threshold": 12, "smooth_ms": 8 }"#,
        )
        .unwrap();

        let args = DecodeArgs {
            config: Some(config_path),
            threshold: Some(40),
            method: Some(BinarizeMethod::Threshold),
            no_merge: true,
            ..args_for(PathBuf::from("capture.pcm"))
        };

        let from_file = resolve_config(&args, None).unwrap();
        assert_eq!(from_file.sample_rate, 22050);
        assert_eq!(from_file.threshold, 40);
        assert_eq!(from_file.smooth_ms, 8);
        assert_eq!(from_file.method, BinarizeMethod::Threshold);
        assert!(!from_file.merge);

        let from_header = resolve_config(&args, Some(8000)).unwrap();
        assert_eq!(from_header.sample_rate, 8000);

        let explicit = DecodeArgs {
            sample_rate: Some(48000),
            ..args
        };
        assert_eq!(resolve_config(&explicit, Some(8000)).unwrap().sample_rate, 48000);
    }

    #[test]
    fn test_resolve_config_rejects_invalid() {
        let args = DecodeArgs {
            window_size: Some(0),
            ..args_for(PathBuf::from("capture.pcm"))
        };
        assert!(resolve_config(&args, None).is_err());
    }

    #[test]
    fn test_binary_requires_output() {
        let args = DecodeArgs {
            format: OutputFormat::Binary,
            ..args_for(PathBuf::from("capture.pcm"))
        };
        assert!(decode(&args).is_err());
    }

    #[test]
    fn test_decode_silence_is_nothing_decoded() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("silence.pcm");
        std::fs::write(&input, vec![0u8; 4410]).unwrap();

        let outcome = decode(&args_for(input)).unwrap();
        assert_eq!(outcome, Outcome::NothingDecoded);
    }

    #[test]
    fn test_decode_missing_input_fails() {
        let dir = tempdir().unwrap();
        assert!(decode(&args_for(dir.path().join("missing.pcm"))).is_err());
    }
}
