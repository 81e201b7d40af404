use moodmind_core::Locale;
use tokio::sync::mpsc;

use super::error::{RecognitionErrorKind, VoiceResult};

/// An event pushed by a running recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// The current transcript of the utterance. Interim transcripts are
    /// followed by more events for the same utterance.
    Transcript { transcript: String, is_final: bool },
    /// A non-fatal recognition error.
    Error {
        kind: RecognitionErrorKind,
        message: String,
    },
}

/// Channel a recognizer delivers its events on.
pub type RecognitionSink = mpsc::UnboundedSender<RecognitionEvent>;

/// Speech-to-text input.
///
/// Implementations push events to the sink they were started with until
/// `stop` is called. A recognizer that cannot run at all fails `start` with a
/// `not-supported` recognition error.
pub trait Recognizer: Send + Sync {
    fn start(&self, locale: Locale, sink: RecognitionSink) -> VoiceResult<()>;

    /// Stops delivering events. Calling it while stopped does nothing.
    fn stop(&self);
}
