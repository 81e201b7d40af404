//! Session state model.
//!
//! `SessionState` is the single mutable aggregate of a screening session. It
//! is owned by the dialogue engine and only changes through engine
//! transitions.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::message::{MessageRole, TranscriptEntry};
use crate::locale::Locale;

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    /// No session running.
    #[default]
    Idle,
    /// A question was asked and a reply is expected.
    AwaitingUser,
    /// Audio is playing. Reported by the controller only; the engine never
    /// enters this status.
    Speaking,
    /// The verdict was rendered or the script ran out.
    Finished,
}

/// A user reply scored against the lexicon of the turn it answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResponse {
    pub turn_index: usize,
    pub raw_text: String,
    pub score: i32,
    pub matched_tokens: Vec<String>,
}

/// An assistant turn rendered to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTurn {
    pub index: usize,
    pub text: String,
}

/// Represents the state of one screening session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub locale: Locale,
    /// Index of the current turn. Never decreases within a session.
    pub turn_index: usize,
    /// Number of replies that indicated risk. Never decreases within a session.
    pub depression_score: u32,
    /// User replies and rendered assistant turns, in order.
    pub transcript: Vec<TranscriptEntry>,
    /// Scored user replies, in order.
    pub responses: Vec<ScoredResponse>,
    pub status: SessionStatus,
}

impl SessionState {
    /// Creates an idle state for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Text of the most recent assistant entry.
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.transcript
            .iter()
            .rev()
            .find(|entry| entry.role == MessageRole::Assistant)
            .map(|entry| entry.text.as_str())
    }

    /// Number of assistant entries in the transcript.
    pub fn assistant_turns(&self) -> usize {
        self.transcript
            .iter()
            .filter(|entry| entry.role == MessageRole::Assistant)
            .count()
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::AwaitingUser | SessionStatus::Speaking
        )
    }
}
