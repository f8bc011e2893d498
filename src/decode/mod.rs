//! Square-wave decoding pipeline
//!
//! Stages, each consuming the previous one's output:
//! 1. Binarizer - samples to a 0/1 signal
//! 2. Edge locator - rising edges (cycle boundaries)
//! 3. Cycle quantizer - per-cycle semitone values
//! 4. Note grouper - runs of equal semitones to notes
//! 5. Post-processor - merge, smooth, trim silence

mod binarize;
mod edges;
mod grouper;
mod note;
mod pipeline;
mod postprocess;
mod quantize;

pub use binarize::{binarize, binarize_edges, binarize_threshold};
pub use edges::find_rising_edges;
pub use grouper::group;
pub use note::{total_duration_ms, Note};
pub use pipeline::{decode, decode_with_stats, DecodeStats, Decoded};
pub use postprocess::{merge_consecutive, smooth_parasites, trim_silence};
pub use quantize::{edges_to_semitones, frequency_to_semitone, semitone_to_frequency};
