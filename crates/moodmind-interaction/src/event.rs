use moodmind_core::Locale;
use serde::Serialize;

use crate::voice::RecognitionErrorKind;

/// Notifications the session controller pushes to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The recognizer's current transcript. It replaces the pending draft.
    PartialTranscript { text: String },
    RecognitionError {
        kind: RecognitionErrorKind,
        message: String,
    },
    /// Audio output started or stopped.
    SpeakingChanged { speaking: bool },
    /// The turn could not be spoken in this locale. The session goes on.
    SynthesisUnavailable { locale: Locale },
}
