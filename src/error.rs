//! Error types for PCM encoding and silence trimming

use thiserror::Error;

/// Errors that can occur while trimming or encoding audio
#[derive(Error, Debug)]
pub enum PcmError {
    /// Invalid input parameters (malformed buffer, bad threshold, unsupported format)
    ///
    /// Always raised before any byte is written to a sink.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sink or filesystem failure, carrying the underlying cause
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio decoding error
    #[error("Decoding error: {0}")]
    Decoding(String),
}

impl From<symphonia::core::errors::Error> for PcmError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => PcmError::Io(e),
            other => PcmError::Decoding(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_keeps_source() {
        let err: PcmError = std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full").into();
        assert!(matches!(err, PcmError::Io(_)));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error: disk full");
    }

    #[test]
    fn test_invalid_input_display() {
        let err = PcmError::InvalidInput("channel count must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid input: channel count must be > 0");
    }

    #[test]
    fn test_symphonia_error_mapping() {
        let err: PcmError = symphonia::core::errors::Error::Unsupported("codec").into();
        assert!(matches!(err, PcmError::Decoding(_)));
    }
}
