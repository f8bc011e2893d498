//! Note list renderers
//!
//! The decoder hands its notes to one of these formats:
//! - `arduino`: C arrays for a `tone()` sketch
//! - `binary`: 4-byte little-endian frames
//! - `json`: array of note objects

mod arduino;
mod frames;

pub use arduino::format_arduino;
pub use frames::{decode_frames, encode_frames, FRAME_SIZE};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::decode::Note;
use crate::error::Result;

/// Output format for a decoded note list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `int melody[]` / `int durations[]` C arrays
    #[default]
    Arduino,
    /// uint16 frequency + uint16 duration per note, little-endian
    Binary,
    /// Pretty-printed JSON array
    Json,
}

impl OutputFormat {
    /// True for formats that are not printable text
    pub fn is_binary(self) -> bool {
        matches!(self, OutputFormat::Binary)
    }
}

/// Render notes in the requested format
pub fn render(notes: &[Note], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Arduino => Ok(format_arduino(notes).into_bytes()),
        OutputFormat::Binary => encode_frames(notes),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(notes)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json() {
        let notes = vec![Note::new(440, 250)];
        let data = render(&notes, OutputFormat::Json).unwrap();
        let parsed: Vec<Note> = serde_json::from_slice(&data).unwrap();
        assert_eq!(parsed, notes);

        let text = String::from_utf8(data).unwrap();
        assert!(text.contains("\"frequency_hz\": 440"));
    }

    #[test]
    fn test_render_binary_and_text() {
        let notes = vec![Note::new(440, 250), Note::rest(10)];
        assert_eq!(render(&notes, OutputFormat::Binary).unwrap().len(), 8);

        let text = render(&notes, OutputFormat::Arduino).unwrap();
        assert!(String::from_utf8(text).unwrap().contains("440, 0"));
        assert!(OutputFormat::Binary.is_binary());
        assert!(!OutputFormat::Json.is_binary());
    }
}
