//! Unified error hierarchy for sortrs
//!
//! The calculation engines (calibrate, events, summary) are total and never
//! fail; errors only arise at the decode boundary, during export, and in
//! configuration handling.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all sortrs operations
#[derive(Debug, Error)]
pub enum SorTraceError {
    /// Decoded-dump boundary errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors at the decoder-output boundary
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Dump file not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Dump is not valid JSON or does not match the documented block shape
    #[error("Malformed decoder dump: {reason}")]
    Malformed { reason: String },
}

/// Result type alias for sortrs operations
pub type Result<T> = std::result::Result<T, SorTraceError>;

impl SorTraceError {
    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            SorTraceError::Decode(DecodeError::FileNotFound { path }) => {
                format!("Could not find decoded trace file: {}", path.display())
            }
            SorTraceError::Decode(DecodeError::Malformed { reason }) => {
                format!(
                    "Trace file is not a valid decoder dump: {}. \
                     Run the SOR decoder first and pass its JSON output.",
                    reason
                )
            }
            SorTraceError::Export(e) => format!("Could not write output: {}", e),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_file_not_found() {
        let err = SorTraceError::Decode(DecodeError::FileNotFound {
            path: PathBuf::from("trace.json"),
        });
        assert!(err.user_message().contains("Could not find"));
        assert!(err.user_message().contains("trace.json"));
    }

    #[test]
    fn test_user_message_malformed() {
        let err = SorTraceError::Decode(DecodeError::Malformed {
            reason: "expected object".to_string(),
        });
        assert!(err.user_message().contains("decoder dump"));
    }
}
