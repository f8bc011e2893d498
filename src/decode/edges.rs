//! Edge locator
//!
//! Rising edges delimit the cycles of the square wave.

use log::debug;

/// Find every 0 -> 1 transition in `binary`
///
/// The list always starts with the synthetic reference index 0 and is
/// strictly increasing. The signal is taken to be low before index 0, and a
/// transition there coincides with the reference, so it is not added twice.
pub fn find_rising_edges(binary: &[bool]) -> Vec<usize> {
    let mut edges = vec![0];
    let mut last = false;

    for (i, &value) in binary.iter().enumerate() {
        if !last && value && i > 0 {
            debug!("Rising edge found at {}", i);
            edges.push(i);
        }
        last = value;
    }

    edges
}
