//! pulse-decode - PC speaker capture decoder
//!
//! Converts a recorded square-wave signal into a compact list of
//! (frequency, duration) notes for tone playback on small boards.
//!
//! # Architecture
//!
//! The decoder is a strictly forward batch pipeline:
//! - Binarize the signed 8-bit capture (level threshold or slope edges)
//! - Locate rising edges, one per cycle
//! - Quantize every cycle to a semitone against a reference pitch
//! - Group equal semitones into notes, treating very short runs as noise
//! - Merge, smooth and trim the note list
//!
//! File loading, output formats, previews and the CLI live around it in
//! `engine`, `output` and `cli`.

pub mod cli;
pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod output;

pub use config::{BinarizeMethod, DecodeConfig};
pub use decode::{decode, decode_with_stats, Note};
pub use error::{PulseError, Result};
