//! Binary frame codec
//!
//! One frame per note: `u16` frequency in Hz followed by `u16` duration in
//! ms, both little-endian. No header, no padding.

use crate::decode::Note;
use crate::error::{PulseError, Result};

/// Size of one encoded note in bytes
pub const FRAME_SIZE: usize = 4;

/// Encode notes as 4-byte frames
///
/// Every note is checked before anything is emitted, so a value above 65535
/// never yields a truncated stream.
pub fn encode_frames(notes: &[Note]) -> Result<Vec<u8>> {
    let mut fields = Vec::with_capacity(notes.len());
    for note in notes {
        let frequency = to_u16("frequency_hz", note.frequency_hz)?;
        let duration = to_u16("duration_ms", note.duration_ms)?;
        fields.push((frequency, duration));
    }

    let mut data = Vec::with_capacity(fields.len() * FRAME_SIZE);
    for (frequency, duration) in fields {
        data.extend_from_slice(&frequency.to_le_bytes());
        data.extend_from_slice(&duration.to_le_bytes());
    }
    Ok(data)
}

/// Parse a frame stream back into notes
pub fn decode_frames(data: &[u8]) -> Result<Vec<Note>> {
    if data.len() % FRAME_SIZE != 0 {
        return Err(PulseError::InvalidFrames {
            reason: format!(
                "{} bytes is not a multiple of the {}-byte frame size",
                data.len(),
                FRAME_SIZE
            ),
        });
    }

    Ok(data
        .chunks_exact(FRAME_SIZE)
        .map(|frame| {
            let frequency = u16::from_le_bytes([frame[0], frame[1]]);
            let duration = u16::from_le_bytes([frame[2], frame[3]]);
            Note::new(u32::from(frequency), u32::from(duration))
        })
        .collect())
}

fn to_u16(field: &'static str, value: u32) -> Result<u16> {
    u16::try_from(value).map_err(|_| PulseError::ValueOutOfRange { field, value })
}
