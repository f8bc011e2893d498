//! Audio Engine Module
//!
//! Everything that touches audio files:
//! - Sample buffer type
//! - Capture import (raw PCM, WAV)
//! - Square-wave preview rendering and export

pub mod buffer;
pub mod io;

pub use buffer::{SampleBuffer, DEFAULT_PREVIEW_AMPLITUDE};
pub use io::{export_preview, generate_square_tone, import_samples, render_preview};
