//! CLI Module
//!
//! Command-line interface for the pulse decoder.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BinarizeMethod;
use crate::engine::DEFAULT_PREVIEW_AMPLITUDE;
use crate::output::OutputFormat;

/// Decode PC speaker captures into frequency/duration tables
#[derive(Parser, Debug)]
#[command(name = "pulse-decode")]
#[command(version, about, long_about = None)]
#[command(after_help = "Creating PCM input:\n  \
    sox input.wav -r 44100 -c 1 -b 8 -e signed-integer output.pcm\n  \
    ffmpeg -i input.mp3 -f s8 -ar 44100 -ac 1 output.pcm")]
pub struct Cli {
    /// Enable verbose output (per-edge debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a capture into notes
    #[command(name = "decode")]
    Decode(DecodeArgs),

    /// Print the notes stored in a binary frame file
    #[command(name = "frames")]
    Frames {
        /// Binary frame file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Arduino)]
        format: OutputFormat,
    },

    /// Render a binary frame file to a square-wave WAV preview
    #[command(name = "preview")]
    Preview {
        /// Binary frame file
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Preview sample rate in Hz
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,

        /// Volume as a fraction of full scale
        #[arg(long, default_value_t = DEFAULT_PREVIEW_AMPLITUDE)]
        amplitude: f32,
    },

    /// Print the default decoder configuration as JSON
    #[command(name = "config")]
    Config,
}

/// Arguments of the `decode` command
///
/// Unset options fall back to the `--config` file, then to the WAV header
/// (sample rate only), then to the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct DecodeArgs {
    /// Input capture: raw signed 8-bit mono PCM, or a .wav file
    pub input: PathBuf,

    /// Output file (default: stdout; required for binary)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Arduino)]
    pub format: OutputFormat,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// PCM sample rate in Hz [default: 44100]
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Speed multiplier (0.8 for a 20 MHz board, 1.0 for 16 MHz) [default: 1.0]
    #[arg(long)]
    pub speed: Option<f64>,

    /// Reference frequency for semitone quantization [default: 55 Hz = A1]
    #[arg(long)]
    pub base_freq: Option<f64>,

    /// Binarization method: edge (degraded signals) or threshold (clean) [default: edge]
    #[arg(long)]
    pub method: Option<BinarizeMethod>,

    /// Edge: minimum window delta. Threshold: absolute level [default: 30]
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<i32>,

    /// Window size for edge detection [default: 5]
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Runs of this many cycles or fewer count as silence [default: 1]
    #[arg(long)]
    pub min_cycles: Option<u32>,

    /// Remove notes up to this many ms between two equal notes (0 = off)
    #[arg(long)]
    pub smooth: Option<u32>,

    /// Keep consecutive equal notes separate
    #[arg(long)]
    pub no_merge: bool,

    /// Also write a square-wave WAV preview
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Preview volume as a fraction of full scale
    #[arg(long, default_value_t = DEFAULT_PREVIEW_AMPLITUDE)]
    pub amplitude: f32,
}
