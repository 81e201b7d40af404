//! Transcript message types.

use serde::{Deserialize, Serialize};

/// Represents the author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Reply typed or spoken by the user.
    User,
    /// Scripted prompt or verdict.
    Assistant,
}

/// A single entry of the session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// The role of the message author.
    pub role: MessageRole,
    /// The rendered text, possibly containing light markup such as `<br>`.
    pub text: String,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            text: text.into(),
        }
    }
}
