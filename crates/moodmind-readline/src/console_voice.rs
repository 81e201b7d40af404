//! Voice port implementations for a plain terminal.
//!
//! The terminal cannot play audio, so "speaking" prints the normalized speech
//! text as a dimmed line and finishes at once. Recognition is not available.

use colored::Colorize;
use moodmind_core::Locale;
use moodmind_interaction::voice::{
    RecognitionErrorKind, RecognitionSink, Recognizer, SpeechBackend, Synthesizer, Utterance,
    Voice, VoiceError, VoiceResult,
};

/// Speech backend offering one console voice per configured language tag.
pub struct ConsoleSpeech {
    voices: Vec<Voice>,
}

impl ConsoleSpeech {
    pub fn new(tags: &[String]) -> Self {
        Self {
            voices: tags
                .iter()
                .map(|tag| Voice::new(format!("Console {}", tag), tag.clone()))
                .collect(),
        }
    }
}

impl SpeechBackend for ConsoleSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&self, text: &str, voice: &Voice) -> VoiceResult<Utterance> {
        println!("{}", format!("  ♪ [{}] {}", voice.lang, text).dimmed());
        Ok(Utterance::completed())
    }

    fn cancel(&self) {}
}

/// Stand-in for an online voice service used when no console voice matches.
pub struct ConsoleFallback {
    voice_name: String,
}

impl ConsoleFallback {
    pub fn new(voice_name: impl Into<String>) -> Self {
        Self {
            voice_name: voice_name.into(),
        }
    }
}

impl Synthesizer for ConsoleFallback {
    fn speak(&self, text: &str, _locale: Locale) -> VoiceResult<Utterance> {
        println!("{}", format!("  ♪ [{}] {}", self.voice_name, text).dimmed());
        Ok(Utterance::completed())
    }

    fn cancel(&self) {}

    fn is_ready(&self) -> bool {
        !self.voice_name.trim().is_empty()
    }
}

/// Recognizer for environments without a microphone pipeline.
pub struct UnsupportedRecognizer;

impl Recognizer for UnsupportedRecognizer {
    fn start(&self, _locale: Locale, _sink: RecognitionSink) -> VoiceResult<()> {
        Err(VoiceError::recognition(
            RecognitionErrorKind::NotSupported,
            "Speech recognition is not supported in this terminal",
        ))
    }

    fn stop(&self) {}
}
