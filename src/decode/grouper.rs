//! Note grouper
//!
//! Collapses runs of equal semitone values into note events. A run of
//! `min_cycles` cycles or fewer is too short to be a tone and is reported as
//! silence, which filters out single-cycle glitches.

use log::debug;

use super::note::Note;
use super::quantize::semitone_to_frequency;

/// Timing and pitch parameters shared by every run
#[derive(Debug, Clone, Copy)]
struct RunContext<'a> {
    edges: &'a [usize],
    rate: f64,
    base_freq: f64,
    min_cycles: u32,
}

impl RunContext<'_> {
    /// Note for a run of `cycles` cycles with value `semitone`, spanning `edges[start]..edges[end]`
    ///
    /// Returns `None` when the run rounds to 0 ms.
    fn close(&self, semitone: i32, cycles: usize, start: usize, end: usize) -> Option<Note> {
        let frequency_hz = if cycles > self.min_cycles as usize {
            semitone_to_frequency(semitone, self.base_freq)
        } else {
            0
        };

        let span = self.edges[end].saturating_sub(self.edges[start]);
        let duration_ms = (1000.0 * span as f64 / self.rate).round() as u32;

        if duration_ms == 0 {
            return None;
        }

        debug!(
            "Run of {} cycles at semitone {} -> {} Hz for {} ms",
            cycles, semitone, frequency_hz, duration_ms
        );
        Some(Note::new(frequency_hz, duration_ms))
    }
}

/// Group per-cycle semitone values into notes
///
/// `semitones[i]` is the cycle between `edges[i]` and `edges[i + 1]`. A run
/// ends where the value changes; its duration runs from its first edge to
/// the edge where the next run starts. A run's cycle count does not include
/// its opening cycle, so the final run is judged on one cycle fewer than it
/// spans, is measured to the last edge, and is skipped when that count is 0.
/// Runs shorter than 1 ms are dropped.
pub fn group(
    semitones: &[i32],
    edges: &[usize],
    sample_rate: u32,
    speed_multiplier: f64,
    base_freq: f64,
    min_cycles: u32,
) -> Vec<Note> {
    if semitones.is_empty() || edges.len() < 2 {
        return Vec::new();
    }

    let ctx = RunContext {
        edges,
        rate: f64::from(sample_rate) * speed_multiplier,
        base_freq,
        min_cycles,
    };

    let mut notes = Vec::new();
    let mut last: Option<i32> = None;
    let mut run_start = 0;

    for (i, &semitone) in semitones.iter().enumerate() {
        if let Some(previous) = last {
            if previous != semitone {
                notes.extend(ctx.close(previous, i - run_start, run_start, i));
                run_start = i;
            }
        }
        last = Some(semitone);
    }

    if let Some(previous) = last {
        let cycles = semitones.len() - run_start - 1;
        if cycles > 0 {
            notes.extend(ctx.close(previous, cycles, run_start, edges.len() - 1));
        }
    }

    notes
}
