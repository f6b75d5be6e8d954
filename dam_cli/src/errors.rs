//! # CLI Error Types
//!
//! Errors raised by the design-file and prompt layer. Analysis input errors
//! from `dam_core` are wrapped unchanged so their field/reason context
//! reaches the user.

use dam_core::DamError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CliError {
    /// Invalid geometry or hydraulic input
    #[error(transparent)]
    Analysis(#[from] DamError),

    /// Bad command line usage
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CliError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CliError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CliError::SerializationError { reason: reason.into() }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CliError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Analysis(e) => e.error_code(),
            CliError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            CliError::FileError { .. } => "FILE_ERROR",
            CliError::FileLocked { .. } => "FILE_LOCKED",
            CliError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CliError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_analysis_error() {
        let err: CliError = DamError::invalid_geometry("height_m", "0", "Height must be positive").into();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        assert!(err.to_string().contains("height_m"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let err = CliError::file_locked("design.dam", "jane (ws-01)", "2025-01-01T00:00:00Z");
        let json = serde_json::to_string(&err).unwrap();
        let roundtrip: CliError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, roundtrip);
        assert!(roundtrip.is_recoverable());
    }
}
