//! Cycle quantizer
//!
//! Each cycle's period becomes a frequency, which is rounded to the nearest
//! equal-tempered semitone relative to the reference pitch. The rounding is
//! what absorbs small period jitter into a single note bucket.

use log::debug;

/// Semitone distance of `frequency` from `base_freq`, rounded to the nearest integer
#[inline]
pub fn frequency_to_semitone(frequency: f64, base_freq: f64) -> i32 {
    (12.0 * (frequency / base_freq).log2()).round() as i32
}

/// Frequency in Hz of the semitone `semitone` above `base_freq`, rounded to whole Hz
#[inline]
pub fn semitone_to_frequency(semitone: i32, base_freq: f64) -> u32 {
    (base_freq * 2f64.powf(f64::from(semitone) / 12.0)).round() as u32
}

/// Convert consecutive edge pairs into semitone values
///
/// `sample_rate * speed_multiplier / period` is the cycle frequency. Pairs
/// with a non-positive period or frequency are skipped.
pub fn edges_to_semitones(
    edges: &[usize],
    sample_rate: u32,
    speed_multiplier: f64,
    base_freq: f64,
) -> Vec<i32> {
    let rate = f64::from(sample_rate) * speed_multiplier;
    let mut semitones = Vec::with_capacity(edges.len().saturating_sub(1));

    for pair in edges.windows(2) {
        let period = pair[1].saturating_sub(pair[0]);
        if period == 0 {
            continue;
        }

        let frequency = rate / period as f64;
        if frequency <= 0.0 {
            continue;
        }

        let semitone = frequency_to_semitone(frequency, base_freq);
        debug!("Note {} found between {} and {}", semitone, pair[0], pair[1]);
        semitones.push(semitone);
    }

    semitones
}
