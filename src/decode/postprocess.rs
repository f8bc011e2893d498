//! Note post-processing
//!
//! Three composable passes over a note sequence: merge equal neighbours,
//! smooth out parasite notes, trim silence at both ends.

use log::debug;

use super::note::Note;

/// Collapse consecutive notes of equal frequency, summing their durations
pub fn merge_consecutive(notes: &[Note]) -> Vec<Note> {
    let mut merged: Vec<Note> = Vec::with_capacity(notes.len());

    for note in notes {
        match merged.last_mut() {
            Some(current) if current.frequency_hz == note.frequency_hz => {
                current.duration_ms = current.duration_ms.saturating_add(note.duration_ms);
            }
            _ => merged.push(*note),
        }
    }

    merged
}

/// Drop short notes sandwiched between two notes of equal frequency
///
/// An interior note lasting `smooth_ms` or less whose neighbours share a
/// frequency is removed and its duration is added to the following note.
/// The pass runs once, left to right, over the original positions: a note
/// that received a folded duration is judged with that longer duration, and
/// neighbours are always the original ones. Newly adjacent equal notes are
/// left for a subsequent merge.
pub fn smooth_parasites(notes: &[Note], smooth_ms: u32) -> Vec<Note> {
    if smooth_ms == 0 || notes.len() < 3 {
        return notes.to_vec();
    }

    let last = notes.len() - 1;
    let mut smoothed = Vec::with_capacity(notes.len());
    smoothed.push(notes[0]);

    let mut carry: u32 = 0;
    for i in 1..last {
        let note = Note {
            duration_ms: notes[i].duration_ms.saturating_add(carry),
            ..notes[i]
        };
        carry = 0;

        if note.duration_ms <= smooth_ms && notes[i - 1].frequency_hz == notes[i + 1].frequency_hz
        {
            debug!("Removing note {} ({:?})", i, note);
            carry = note.duration_ms;
            continue;
        }
        smoothed.push(note);
    }

    smoothed.push(Note {
        duration_ms: notes[last].duration_ms.saturating_add(carry),
        ..notes[last]
    });

    smoothed
}

/// Remove silent notes from both ends
pub fn trim_silence(notes: &[Note]) -> Vec<Note> {
    let start = notes
        .iter()
        .position(|n| !n.is_silence())
        .unwrap_or(notes.len());
    let end = notes
        .iter()
        .rposition(|n| !n.is_silence())
        .map_or(start, |idx| idx + 1);

    notes[start..end].to_vec()
}
