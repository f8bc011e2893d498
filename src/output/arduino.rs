//! C-array text for Arduino / ESP32 sketches
//!
//! Two parallel `int` arrays, `melody[]` with frequencies and `durations[]`
//! with lengths in ms, ready to paste into a `tone()` loop.

use crate::decode::Note;

/// Format notes as the `melody[]` / `durations[]` template
pub fn format_arduino(notes: &[Note]) -> String {
    let frequencies = join(notes.iter().map(|n| n.frequency_hz));
    let durations = join(notes.iter().map(|n| n.duration_ms));

    [
        "int melody[] = {".to_string(),
        format!("  {}", frequencies),
        "};".to_string(),
        String::new(),
        "int durations[] = {".to_string(),
        format!("  {}", durations),
        "};".to_string(),
    ]
    .join("\n")
}

fn join(values: impl Iterator<Item = u32>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_template() {
        let notes = vec![Note::new(440, 250), Note::rest(30), Note::new(523, 500)];
        let expected = "int melody[] = {\n  440, 0, 523\n};\n\nint durations[] = {\n  250, 30, 500\n};";
        assert_eq!(format_arduino(&notes), expected);
    }

    #[test]
    fn test_empty_arrays() {
        let text = format_arduino(&[]);
        assert!(text.starts_with("int melody[] = {\n  \n};"));
    }
}
