//! Integration Tests
//!
//! End-to-end decoding of synthesized square-wave captures.

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use pulse_decode::decode::{binarize, find_rising_edges};
use pulse_decode::engine::{export_preview, generate_square_tone, import_samples};
use pulse_decode::output::{decode_frames, encode_frames};
use pulse_decode::{decode, decode_with_stats, BinarizeMethod, DecodeConfig, Note};

const SAMPLE_RATE: u32 = 44100;
const AMPLITUDE: i8 = 100;

fn threshold_config() -> DecodeConfig {
    DecodeConfig {
        method: BinarizeMethod::Threshold,
        threshold: 0,
        ..DecodeConfig::default()
    }
}

fn assert_duration(actual: u32, expected: u32, tolerance: u32) {
    assert!(
        actual.abs_diff(expected) <= tolerance,
        "Expected ~{} ms, got {} ms",
        expected,
        actual
    );
}

// === Single Tone ===

#[test]
fn test_constant_440hz_threshold() {
    let samples = generate_square_tone(440.0, 2.0, SAMPLE_RATE, AMPLITUDE);

    let notes = decode(&samples, &threshold_config()).unwrap();

    assert_eq!(notes.len(), 1, "notes: {:?}", notes);
    assert!(notes[0].frequency_hz.abs_diff(440) <= 1);
    assert_duration(notes[0].duration_ms, 2000, 10);
}

#[test]
fn test_constant_440hz_edge_method() {
    let samples = generate_square_tone(440.0, 2.0, SAMPLE_RATE, AMPLITUDE);
    let config = DecodeConfig::default();
    assert_eq!(config.method, BinarizeMethod::Edge);

    let notes = decode(&samples, &config).unwrap();

    assert_eq!(notes.len(), 1, "notes: {:?}", notes);
    assert!(notes[0].frequency_hz.abs_diff(440) <= 1);
    assert_duration(notes[0].duration_ms, 2000, 10);
}

#[test]
fn test_edge_method_survives_level_drift() {
    // A capture whose DC level wanders far past any fixed threshold
    let tone = generate_square_tone(440.0, 1.0, SAMPLE_RATE, 40);
    let samples: Vec<i8> = tone
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let drift = if (i / 11025) % 2 == 0 { 60 } else { -60 };
            (i32::from(s) + drift) as i8
        })
        .collect();

    let notes = decode(&samples, &DecodeConfig::default()).unwrap();
    let longest = notes.iter().max_by_key(|n| n.duration_ms).unwrap();
    assert_eq!(longest.frequency_hz, 440);

    let tonal_ms: u32 = notes
        .iter()
        .filter(|n| n.frequency_hz == 440)
        .map(|n| n.duration_ms)
        .sum();
    assert_duration(tonal_ms, 1000, 20);
}

// === Silence ===

#[test]
fn test_pure_silence() {
    let samples = vec![0i8; SAMPLE_RATE as usize];

    for method in [BinarizeMethod::Threshold, BinarizeMethod::Edge] {
        let binary = binarize(&samples, 30, method, 5);
        assert!(binary.iter().all(|&b| !b));
        assert_eq!(find_rising_edges(&binary), vec![0]);

        let config = DecodeConfig {
            method,
            ..DecodeConfig::default()
        };
        let decoded = decode_with_stats(&samples, &config).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.stats.rising_edges, 0);
    }
}

// === Multiple Tones ===

#[test]
fn test_two_tones_back_to_back() {
    let mut samples = generate_square_tone(300.0, 0.5, SAMPLE_RATE, AMPLITUDE);
    samples.extend(generate_square_tone(600.0, 0.5, SAMPLE_RATE, AMPLITUDE));

    let config = DecodeConfig {
        merge: true,
        ..threshold_config()
    };
    let notes = decode(&samples, &config).unwrap();

    assert_eq!(notes.len(), 2, "notes: {:?}", notes);
    // Semitone quantization keeps each within half a semitone (~3%)
    assert_relative_eq!(f64::from(notes[0].frequency_hz), 300.0, max_relative = 0.03);
    assert_relative_eq!(f64::from(notes[1].frequency_hz), 600.0, max_relative = 0.03);
    assert_duration(notes[0].duration_ms, 500, 5);
    assert_duration(notes[1].duration_ms, 500, 5);
}

#[test]
fn test_glitch_absorbed_by_smoothing() {
    let mut samples = generate_square_tone(440.0, 0.2, SAMPLE_RATE, AMPLITUDE);
    // One 220-sample cycle (~200 Hz, 5 ms)
    samples.extend(vec![AMPLITUDE; 110]);
    samples.extend(vec![-AMPLITUDE; 110]);
    samples.extend(generate_square_tone(440.0, 0.2, SAMPLE_RATE, AMPLITUDE));

    let unsmoothed = decode(&samples, &threshold_config()).unwrap();
    assert_eq!(unsmoothed.len(), 3, "notes: {:?}", unsmoothed);
    assert_eq!(unsmoothed[1].frequency_hz, 0);
    let total: u32 = unsmoothed.iter().map(|n| n.duration_ms).sum();

    let config = DecodeConfig {
        smooth_ms: 10,
        ..threshold_config()
    };
    let smoothed = decode(&samples, &config).unwrap();

    assert_eq!(smoothed, vec![Note::new(440, total)]);
    assert_duration(total, 405, 5);
}

#[test]
fn test_speed_multiplier_rescales() {
    let samples = generate_square_tone(440.0, 1.0, SAMPLE_RATE, AMPLITUDE);
    let config = DecodeConfig {
        speed_multiplier: 0.5,
        ..threshold_config()
    };

    let notes = decode(&samples, &config).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].frequency_hz, 220);
    // Half speed doubles every duration
    assert_duration(notes[0].duration_ms, 2000, 10);
}

// === File Round Trips ===

#[test]
fn test_wav_capture_uses_header_rate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capture.wav");

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22050,
        bits_per_sample: 8,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for sample in generate_square_tone(440.0, 1.0, 22050, AMPLITUDE) {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();

    let buffer = import_samples(&path).unwrap();
    assert_eq!(buffer.sample_rate, Some(22050));

    let config = DecodeConfig {
        sample_rate: 22050,
        ..threshold_config()
    };
    let notes = decode(&buffer.samples, &config).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].frequency_hz, 440);
}

#[test]
fn test_raw_pcm_file_to_frames() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("capture.pcm");
    let tone = generate_square_tone(440.0, 0.5, SAMPLE_RATE, AMPLITUDE);
    std::fs::write(&path, tone.iter().map(|&s| s as u8).collect::<Vec<u8>>()).unwrap();

    let buffer = import_samples(&path).unwrap();
    let notes = decode(&buffer.samples, &DecodeConfig::default()).unwrap();

    let frames = encode_frames(&notes).unwrap();
    assert_eq!(frames.len(), 4 * notes.len());
    assert_eq!(decode_frames(&frames).unwrap(), notes);
}

#[test]
fn test_preview_decodes_back_to_same_notes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preview.wav");
    let notes = vec![Note::new(440, 500), Note::new(880, 500)];

    export_preview(&notes, &path, SAMPLE_RATE, 0.5).unwrap();

    let buffer = import_samples(&path).unwrap();
    let decoded = decode(&buffer.samples, &threshold_config()).unwrap();

    assert_eq!(decoded.len(), 2, "notes: {:?}", decoded);
    assert_eq!(decoded[0].frequency_hz, 440);
    assert_eq!(decoded[1].frequency_hz, 880);
    assert_duration(decoded[0].duration_ms, 500, 5);
    assert_duration(decoded[1].duration_ms, 500, 5);
}
