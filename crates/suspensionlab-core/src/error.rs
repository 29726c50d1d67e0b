//! Error types for the setup diary
//!
//! Decode and validation outcomes have their own types
//! ([`DecodeError`](crate::codec::DecodeError) and
//! [`Rejected`](crate::validation::Rejected)); this module covers the
//! operations that touch storage.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::Rejected;

/// Errors raised by [`SetupDiary`](crate::diary::SetupDiary)
#[derive(Error, Debug)]
pub enum DiaryError {
    /// Setup failed validation under the requested policy
    #[error(transparent)]
    Rejected(#[from] Rejected),

    /// No entry with this id exists
    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Diary file could not be read or written
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Diary file is not valid diary JSON
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiaryError {
    /// The rejection report, when the error is a validation rejection
    pub fn rejection(&self) -> Option<&Rejected> {
        match self {
            DiaryError::Rejected(rejected) => Some(rejected),
            _ => None,
        }
    }
}

/// Result type alias for diary operations
pub type Result<T> = std::result::Result<T, DiaryError>;
