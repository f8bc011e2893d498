//! Decoder configuration
//!
//! `DecodeConfig` is the whole configuration surface of the pipeline. It can
//! be built in code, loaded from a JSON file, or assembled by the CLI.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

/// Default capture sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default reference pitch in Hz (A1)
pub const DEFAULT_BASE_FREQ: f64 = 55.0;

/// Default level (threshold method) or minimum window delta (edge method)
pub const DEFAULT_THRESHOLD: i32 = 30;

/// Default edge-detection window size in samples
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// How raw samples are turned into a 0/1 signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum BinarizeMethod {
    /// Absolute level threshold, for clean captures
    Threshold,
    /// Slope-based edge detection, for re-recorded or drifting captures
    #[default]
    Edge,
}

impl fmt::Display for BinarizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinarizeMethod::Threshold => write!(f, "threshold"),
            BinarizeMethod::Edge => write!(f, "edge"),
        }
    }
}

impl FromStr for BinarizeMethod {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "threshold" => Ok(BinarizeMethod::Threshold),
            "edge" => Ok(BinarizeMethod::Edge),
            _ => Err(PulseError::UnknownMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for BinarizeMethod {
    type Error = PulseError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Capture sample rate in Hz
    pub sample_rate: u32,
    /// Playback speed correction (e.g. 0.8 for a 20 MHz board running 16 MHz code)
    pub speed_multiplier: f64,
    /// Reference pitch for semitone quantization in Hz
    pub base_freq: f64,
    /// Binarization algorithm
    pub method: BinarizeMethod,
    /// Absolute level for `Threshold`, minimum window delta for `Edge`
    pub threshold: i32,
    /// Edge-detection window (and dead zone) size in samples
    pub window_size: usize,
    /// Merge consecutive notes of equal frequency
    pub merge: bool,
    /// Maximum parasite duration in ms; 0 disables smoothing
    pub smooth_ms: u32,
    /// Runs of this many cycles or fewer are reported as silence
    pub min_cycles: u32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            speed_multiplier: 1.0,
            base_freq: DEFAULT_BASE_FREQ,
            method: BinarizeMethod::Edge,
            threshold: DEFAULT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
            merge: true,
            smooth_ms: 0,
            min_cycles: 1,
        }
    }
}

impl DecodeConfig {
    /// Load a configuration from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PulseError::FileNotFound {
                path: path.display().to_string(),
                source: None,
            });
        }

        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;

        // Surface a bad method name as a config error, not a parse error
        if let Some(method) = value.get("method").and_then(|m| m.as_str()) {
            method.parse::<BinarizeMethod>()?;
        }

        let config: DecodeConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(PulseError::InvalidConfig {
                field: "sample_rate",
                reason: "must be greater than 0".to_string(),
            });
        }

        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(PulseError::InvalidConfig {
                field: "speed_multiplier",
                reason: format!("must be a positive number, got {}", self.speed_multiplier),
            });
        }

        if !self.base_freq.is_finite() || self.base_freq <= 0.0 {
            return Err(PulseError::InvalidConfig {
                field: "base_freq",
                reason: format!("must be a positive number, got {}", self.base_freq),
            });
        }

        if self.window_size == 0 {
            return Err(PulseError::InvalidConfig {
                field: "window_size",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
