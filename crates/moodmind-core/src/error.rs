//! Error types for the MoodMind domain layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the screening domain.
///
/// Voice failures (recognition, synthesis) are reported separately by
/// `moodmind-interaction` because they never abort a session.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodmindError {
    /// Malformed arguments reached the scorer or the controller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An engine operation was invoked in the wrong session status.
    #[error("Operation '{operation}' is not allowed while the session is {status}")]
    OutOfSequence { operation: String, status: String },

    /// A locale change was attempted while a session is running.
    #[error("Locale is locked to '{current}' until the session is reset")]
    LocaleLocked { current: String },

    /// A script is malformed or a branch produced an index out of range.
    #[error("Script integrity error: {0}")]
    ScriptIntegrity(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl MoodmindError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an OutOfSequence error
    pub fn out_of_sequence(operation: impl Into<String>, status: impl ToString) -> Self {
        Self::OutOfSequence {
            operation: operation.into(),
            status: status.to_string(),
        }
    }

    /// Creates a LocaleLocked error
    pub fn locale_locked(current: impl ToString) -> Self {
        Self::LocaleLocked {
            current: current.to_string(),
        }
    }

    /// Creates a ScriptIntegrity error
    pub fn script_integrity(message: impl Into<String>) -> Self {
        Self::ScriptIntegrity(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_out_of_sequence(&self) -> bool {
        matches!(self, Self::OutOfSequence { .. })
    }

    pub fn is_locale_locked(&self) -> bool {
        matches!(self, Self::LocaleLocked { .. })
    }

    pub fn is_script_integrity(&self) -> bool {
        matches!(self, Self::ScriptIntegrity(_))
    }

    /// Soft errors are surfaced to the user and the session carries on.
    ///
    /// `OutOfSequence` and `ScriptIntegrity` indicate a programming or data
    /// error and are treated as hard failures.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::LocaleLocked { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MoodmindError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for MoodmindError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML parse error: {}", err))
    }
}

/// A type alias for `Result<T, MoodmindError>`.
pub type Result<T> = std::result::Result<T, MoodmindError>;
