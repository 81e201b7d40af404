//! Error types for the voice port.

use moodmind_core::Locale;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Category of a speech recognition failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecognitionErrorKind {
    NoSpeech,
    Aborted,
    AudioCapture,
    Network,
    NotAllowed,
    ServiceNotAllowed,
    NotSupported,
    LanguageNotSupported,
    Other,
}

impl RecognitionErrorKind {
    /// Returns true if recognition cannot continue after this error.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::AudioCapture
                | Self::NotAllowed
                | Self::ServiceNotAllowed
                | Self::NotSupported
                | Self::LanguageNotSupported
        )
    }
}

/// Failures reported by recognizers and synthesizers.
///
/// None of these abort a session. The controller turns them into events and
/// log lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// The recognizer failed to start or reported an error.
    #[error("Speech recognition error ({kind}): {message}")]
    Recognition {
        kind: RecognitionErrorKind,
        message: String,
    },

    /// No voice and no ready fallback can speak this locale.
    #[error("No speech synthesis voice available for locale '{locale}'")]
    SynthesisUnavailable { locale: Locale },

    /// The speech platform failed.
    #[error("Speech backend error: {0}")]
    Backend(String),
}

impl VoiceError {
    pub fn recognition(kind: RecognitionErrorKind, message: impl Into<String>) -> Self {
        Self::Recognition {
            kind,
            message: message.into(),
        }
    }

    pub fn synthesis_unavailable(locale: Locale) -> Self {
        Self::SynthesisUnavailable { locale }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    pub fn is_recognition(&self) -> bool {
        matches!(self, Self::Recognition { .. })
    }

    pub fn is_synthesis_unavailable(&self) -> bool {
        matches!(self, Self::SynthesisUnavailable { .. })
    }

    /// Recognition error kind, or `Other` for non-recognition errors.
    pub fn recognition_kind(&self) -> RecognitionErrorKind {
        match self {
            Self::Recognition { kind, .. } => *kind,
            _ => RecognitionErrorKind::Other,
        }
    }
}

/// Result type for voice operations.
pub type VoiceResult<T> = std::result::Result<T, VoiceError>;
