//! Error handling for pulse-decode
//!
//! Three categories matter to callers: input errors (the capture cannot be
//! loaded), configuration errors (rejected before any sample is touched) and
//! output errors (a note cannot be represented in the requested format).
//! A capture that decodes to nothing is not an error; it is an empty note list.

use thiserror::Error;

/// Result type alias for pulse-decode operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Main error type for pulse-decode operations
#[derive(Error, Debug)]
pub enum PulseError {
    // Input Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Audio contains no samples")]
    EmptyAudio,

    // Configuration Errors
    #[error("Unknown binarization method: {method} (expected 'edge' or 'threshold')")]
    UnknownMethod { method: String },

    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    // Output Errors
    #[error("{field} value {value} does not fit in a 16-bit frame field")]
    ValueOutOfRange { field: &'static str, value: u32 },

    #[error("Invalid frame data: {reason}")]
    InvalidFrames { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PulseError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            PulseError::FileNotFound { .. } => "FILE_NOT_FOUND",
            PulseError::InvalidAudio { .. } => "INVALID_AUDIO",
            PulseError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PulseError::EmptyAudio => "EMPTY_AUDIO",
            PulseError::UnknownMethod { .. } => "UNKNOWN_METHOD",
            PulseError::InvalidConfig { .. } => "INVALID_CONFIG",
            PulseError::ValueOutOfRange { .. } => "VALUE_OUT_OF_RANGE",
            PulseError::InvalidFrames { .. } => "INVALID_FRAMES",
            PulseError::Io(_) => "IO_ERROR",
            PulseError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Configuration errors are raised before any sample is processed
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PulseError::UnknownMethod { .. } | PulseError::InvalidConfig { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            PulseError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            PulseError::InvalidAudio { .. } | PulseError::UnsupportedFormat { .. } => vec![
                "Convert the capture to raw signed 8-bit PCM first:",
                "  sox input.wav -r 44100 -c 1 -b 8 -e signed-integer output.pcm",
                "  ffmpeg -i input.wav -f s8 -ar 44100 -ac 1 output.pcm",
            ],
            PulseError::EmptyAudio => vec!["The capture is empty - check the recording"],
            PulseError::UnknownMethod { .. } => {
                vec!["Use --method edge (degraded captures) or --method threshold (clean captures)"]
            }
            PulseError::InvalidConfig { .. } => vec![
                "Sample rate, speed multiplier and base frequency must be positive",
                "Window size must be at least 1",
            ],
            PulseError::ValueOutOfRange { .. } => vec![
                "Binary frames hold 16-bit values only",
                "Use the arduino or json format for longer notes",
            ],
            PulseError::InvalidFrames { .. } => {
                vec!["Frame files are a sequence of 4-byte little-endian records"]
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PulseError::FileNotFound {
            path: "capture.pcm".to_string(),
            source: None,
        };
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_errors_are_classified() {
        let err = PulseError::UnknownMethod {
            method: "fft".to_string(),
        };
        assert!(err.is_config_error());
        assert!(err.to_string().contains("fft"));
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_out_of_range_message() {
        let err = PulseError::ValueOutOfRange {
            field: "duration_ms",
            value: 70000,
        };
        assert_eq!(
            err.to_string(),
            "duration_ms value 70000 does not fit in a 16-bit frame field"
        );
    }
}
