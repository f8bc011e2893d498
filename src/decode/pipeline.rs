//! Decode pipeline
//!
//! Runs binarize -> edges -> semitones -> notes -> post-processing strictly
//! in order. Each stage fully completes before the next starts and every
//! intermediate sequence is dropped once consumed.

use log::{info, warn};
use serde::Serialize;

use super::binarize::binarize;
use super::edges::find_rising_edges;
use super::grouper::group;
use super::note::Note;
use super::postprocess::{merge_consecutive, smooth_parasites, trim_silence};
use super::quantize::edges_to_semitones;
use crate::config::DecodeConfig;
use crate::error::Result;

/// Counters collected while decoding
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodeStats {
    /// Number of input samples
    pub samples: usize,
    /// Capture length in seconds at the configured sample rate
    pub capture_secs: f64,
    /// True rising edges, excluding the synthetic reference
    pub rising_edges: usize,
    /// Cycles quantized to a semitone
    pub cycles: usize,
    /// Notes straight out of the grouper
    pub grouped_notes: usize,
    /// Notes after merging, if enabled
    pub merged_notes: Option<usize>,
    /// Notes after smoothing (and re-merging), if enabled
    pub smoothed_notes: Option<usize>,
    /// Notes returned to the caller
    pub final_notes: usize,
}

/// Decoded notes plus the counters gathered on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub notes: Vec<Note>,
    pub stats: DecodeStats,
}

impl Decoded {
    /// True when the capture produced no notes at all
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Decode a signed 8-bit capture into notes
///
/// An empty result is a valid outcome (silence, a single edge, or only
/// noise); only configuration errors fail.
pub fn decode(samples: &[i8], config: &DecodeConfig) -> Result<Vec<Note>> {
    decode_with_stats(samples, config).map(|decoded| decoded.notes)
}

/// Same as [`decode`], also reporting per-stage counters
pub fn decode_with_stats(samples: &[i8], config: &DecodeConfig) -> Result<Decoded> {
    config.validate()?;

    let mut stats = DecodeStats {
        samples: samples.len(),
        capture_secs: samples.len() as f64 / f64::from(config.sample_rate),
        ..DecodeStats::default()
    };
    info!(
        "{} samples ({:.2}s at {} Hz)",
        stats.samples, stats.capture_secs, config.sample_rate
    );

    info!(
        "Binarizing samples (method={}, threshold={})",
        config.method, config.threshold
    );
    let binary = binarize(samples, config.threshold, config.method, config.window_size);

    let edges = find_rising_edges(&binary);
    drop(binary);
    stats.rising_edges = edges.len() - 1;
    info!("Found {} rising edges", stats.rising_edges);

    let semitones = edges_to_semitones(
        &edges,
        config.sample_rate,
        config.speed_multiplier,
        config.base_freq,
    );
    stats.cycles = semitones.len();
    info!("{} cycles analyzed", stats.cycles);

    let mut notes = group(
        &semitones,
        &edges,
        config.sample_rate,
        config.speed_multiplier,
        config.base_freq,
        config.min_cycles,
    );
    stats.grouped_notes = notes.len();
    info!("{} notes before cleanup", stats.grouped_notes);

    if config.merge {
        notes = merge_consecutive(&notes);
        stats.merged_notes = Some(notes.len());
        info!("{} notes after merge", notes.len());
    }

    if config.smooth_ms > 0 {
        notes = smooth_parasites(&notes, config.smooth_ms);
        if config.merge {
            notes = merge_consecutive(&notes);
        }
        stats.smoothed_notes = Some(notes.len());
        info!(
            "{} notes after smoothing parasites up to {} ms",
            notes.len(),
            config.smooth_ms
        );
    }

    notes = trim_silence(&notes);
    stats.final_notes = notes.len();
    info!("{} notes final", stats.final_notes);

    if notes.is_empty() {
        warn!("No notes extracted");
    }

    Ok(Decoded { notes, stats })
}
