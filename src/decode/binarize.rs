//! Binarizer
//!
//! Turns a signed 8-bit capture into a 0/1 signal. Clean captures only need a
//! level threshold. Re-recorded captures drift in amplitude, so the edge
//! method anchors on local slope instead of absolute level.

use log::debug;

use crate::config::BinarizeMethod;

/// Binarize `samples` with the selected method
///
/// For `Threshold`, `threshold` is the absolute level; for `Edge` it is the
/// minimum max-min delta inside a window that counts as a transition.
/// The output always has the same length as the input.
pub fn binarize(
    samples: &[i8],
    threshold: i32,
    method: BinarizeMethod,
    window_size: usize,
) -> Vec<bool> {
    match method {
        BinarizeMethod::Threshold => binarize_threshold(samples, threshold),
        BinarizeMethod::Edge => binarize_edges(samples, window_size, threshold),
    }
}

/// Samples below `threshold` become 0, everything else 1
pub fn binarize_threshold(samples: &[i8], threshold: i32) -> Vec<bool> {
    samples.iter().map(|&s| i32::from(s) >= threshold).collect()
}

/// Slope-based edge detection over non-overlapping windows
///
/// A window whose range reaches `min_delta` holds an edge. It is rising when
/// the maximum comes after the minimum. The edge sits on the sample with the
/// steepest neighbourhood between the two extremes. The `window_size` samples
/// from the edge on are a dead zone that keeps the new state, so one physical
/// transition is never detected twice.
pub fn binarize_edges(samples: &[i8], window_size: usize, min_delta: i32) -> Vec<bool> {
    let len = samples.len();
    if window_size == 0 || len < window_size {
        return vec![false; len];
    }

    let mut binary = vec![false; len];
    let mut state = false;
    let mut i = 0;

    while i + window_size <= len {
        let window = &samples[i..i + window_size];
        let (min_offset, min_val) = first_extreme(window, |candidate, best| candidate < best);
        let (max_offset, max_val) = first_extreme(window, |candidate, best| candidate > best);
        let delta = i32::from(max_val) - i32::from(min_val);

        if delta < min_delta {
            binary[i] = state;
            i += 1;
            continue;
        }

        let min_idx = i + min_offset;
        let max_idx = i + max_offset;
        let (rising, search_start, search_end) = if max_idx > min_idx {
            (true, min_idx, max_idx)
        } else {
            (false, max_idx, min_idx)
        };

        let edge = steepest_point(samples, search_start, search_end);

        binary[i..edge].fill(state);
        state = rising;
        debug!("Edge {} detected at {}", u8::from(state), edge);

        let dead_zone_end = (edge + window_size).min(len);
        binary[edge..dead_zone_end].fill(state);
        i = dead_zone_end;
    }

    binary[i.min(len)..].fill(state);

    // Nothing before the first high sample was backed by a real edge
    let first_high = binary.iter().position(|&b| b).unwrap_or(len);
    binary[..first_high].fill(false);

    binary
}

/// Offset and value of the first element that wins `better` against all others
fn first_extreme(window: &[i8], better: impl Fn(i8, i8) -> bool) -> (usize, i8) {
    let mut best = (0, window[0]);
    for (offset, &value) in window.iter().enumerate().skip(1) {
        if better(value, best.1) {
            best = (offset, value);
        }
    }
    best
}

/// Index in `[start, end]` maximizing `|s[j+1] - s[j-1]|`
///
/// The buffer endpoints have no two neighbours and are skipped. Ties keep the
/// earliest index; a flat range falls back to `start`.
fn steepest_point(samples: &[i8], start: usize, end: usize) -> usize {
    let mut best_idx = start;
    let mut best_slope = 0;

    for j in start..=end {
        if j == 0 || j + 1 >= samples.len() {
            continue;
        }
        let slope = (i32::from(samples[j + 1]) - i32::from(samples[j - 1])).abs();
        if slope > best_slope {
            best_slope = slope;
            best_idx = j;
        }
    }

    best_idx
}
