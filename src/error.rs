//! Error handling module
//!
//! Provides the error type shared by the stores and the backend seams.

use thiserror::Error;

/// Store-wide error type
///
/// Cloneable so one shared fetch result can be replayed to every caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend rejected request: {0}")]
    Rejected(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),
}

impl RecordError {
    /// Stable code for UI layers and logs
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::Transport(_) => "TRANSPORT_ERROR",
            RecordError::Rejected(_) => "REJECTED",
            RecordError::Precondition(_) => "PRECONDITION_FAILED",
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RecordError::Transport(_))
    }
}

/// Result type alias for store operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Helper function to create a transport error
pub fn transport_error(msg: impl Into<String>) -> RecordError {
    RecordError::Transport(msg.into())
}

/// Helper function to create a precondition error
pub fn precondition_error(msg: impl Into<String>) -> RecordError {
    RecordError::Precondition(msg.into())
}
