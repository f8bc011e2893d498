//! Sample Buffer
//!
//! The decoder works on signed 8-bit mono samples. `SampleBuffer` holds a
//! loaded capture together with the sample rate its container declared, if any.

// ============================================================================
// Constants
// ============================================================================

/// Full-scale positive value of a signed 8-bit sample
pub const I8_FULL_SCALE: f32 = 127.0;

/// Default preview amplitude as a fraction of full scale (avoids clipping)
pub const DEFAULT_PREVIEW_AMPLITUDE: f32 = 0.3;

// ============================================================================
// SampleBuffer
// ============================================================================

/// A fully buffered signed 8-bit mono capture
///
/// Immutable once loaded; the decoder only borrows `samples`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    /// Samples in -128..=127, index = time in sample periods
    pub samples: Vec<i8>,
    /// Sample rate from the file header; `None` for headerless raw PCM
    pub sample_rate: Option<u32>,
}

impl SampleBuffer {
    /// Wrap headerless samples
    pub fn raw(samples: Vec<i8>) -> Self {
        Self {
            samples,
            sample_rate: None,
        }
    }

    /// Wrap samples whose rate is known
    pub fn with_rate(samples: Vec<i8>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate: Some(sample_rate),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
