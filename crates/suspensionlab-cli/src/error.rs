//! Error types for the SuspensionLab CLI
//!
//! Provides structured error types for file access, parsing, decoding and
//! rejected setups, each mapped to a process exit code.

use suspensionlab_core::codec::DecodeError;
use suspensionlab_core::error::DiaryError;
use suspensionlab_core::validation::Rejected;
use thiserror::Error;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Setup file parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serialization error while rendering output
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Wire file could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Setup failed validation and was not stored
    #[error("{0}")]
    Rejected(Rejected),
}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CliError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        CliError::FileError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        CliError::ParseError(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CliError::SerializationError(_))
    }
}

impl From<Rejected> for CliError {
    fn from(rejected: Rejected) -> Self {
        CliError::Rejected(rejected)
    }
}

impl From<DiaryError> for CliError {
    fn from(err: DiaryError) -> Self {
        match err {
            DiaryError::Rejected(rejected) => CliError::Rejected(rejected),
            DiaryError::EntryNotFound(id) => {
                CliError::InvalidInput(format!("No diary entry with id {}", id))
            }
            DiaryError::Io(e) => CliError::FileError(e.to_string()),
            DiaryError::Json(e) => CliError::ParseError(format!("Invalid diary file: {}", e)),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::SerializationError(format!("YAML error: {}", err))
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use suspensionlab_core::validation::WarningPolicy;

    #[test]
    fn test_error_display() {
        let err = CliError::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "Invalid input: test error");

        let err = CliError::from(DecodeError::VarintOverflow);
        assert_eq!(err.to_string(), "Decode error: varint exceeds 64 bits");
    }

    #[test]
    fn test_is_user_error() {
        assert!(CliError::invalid_input("test").is_user_error());
        assert!(CliError::file_error("test").is_user_error());
        assert!(CliError::parse_error("test").is_user_error());
        assert!(!CliError::SerializationError("test".to_string()).is_user_error());
    }

    #[test]
    fn test_diary_error_conversion() {
        let rejected = Rejected {
            errors: vec![],
            warnings: vec![],
            policy: WarningPolicy::Block,
        };
        let err: CliError = DiaryError::Rejected(rejected).into();
        assert!(matches!(err, CliError::Rejected(_)));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CliError = DiaryError::Io(io).into();
        assert!(matches!(err, CliError::FileError(_)));
    }
}
