//! Note event produced by the decoder

use serde::{Deserialize, Serialize};

/// A single tone event
///
/// A frequency of 0 means silence (or a run too short to be trusted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Pitch in Hz, 0 for silence
    pub frequency_hz: u32,
    /// Length in milliseconds
    pub duration_ms: u32,
}

impl Note {
    pub fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Silent note of the given length
    pub fn rest(duration_ms: u32) -> Self {
        Self::new(0, duration_ms)
    }

    pub fn is_silence(&self) -> bool {
        self.frequency_hz == 0
    }
}

/// Total length of a note sequence in milliseconds
pub fn total_duration_ms(notes: &[Note]) -> u64 {
    notes.iter().map(|n| u64::from(n.duration_ms)).sum()
}
