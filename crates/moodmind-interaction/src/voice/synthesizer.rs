//! Text-to-speech output.
//!
//! `Synthesizer` is what the session controller talks to. The locale-aware
//! `LocaleSynthesizer` sits on top of a platform `SpeechBackend`, picks a voice
//! for the requested locale and hands over to a fallback synthesizer when the
//! platform has none.

use std::sync::Arc;

use moodmind_core::Locale;
use tokio::sync::oneshot;

use super::error::{VoiceError, VoiceResult};
use super::markup;

/// Handle to a started utterance.
///
/// The utterance is finished when its `Completion` is completed, and
/// cancelled when the completion is dropped without completing.
#[derive(Debug)]
pub struct Utterance {
    done: oneshot::Receiver<()>,
}

/// Producer side of an `Utterance`, held by whoever plays the audio.
#[derive(Debug)]
pub struct Completion {
    done: oneshot::Sender<()>,
}

impl Completion {
    /// Marks the utterance as played to the end.
    pub fn complete(self) {
        let _ = self.done.send(());
    }
}

impl Utterance {
    /// Creates a pending utterance and its completion.
    pub fn pending() -> (Completion, Utterance) {
        let (tx, rx) = oneshot::channel();
        (Completion { done: tx }, Utterance { done: rx })
    }

    /// Creates an utterance that has already finished.
    pub fn completed() -> Utterance {
        let (completion, utterance) = Self::pending();
        completion.complete();
        utterance
    }

    /// Resolves when playback ends. Returns `false` if it was cancelled.
    pub async fn finished(self) -> bool {
        self.done.await.is_ok()
    }

    /// Non-blocking check: `None` while playing, otherwise `Some(completed)`.
    pub fn try_finished(&mut self) -> Option<bool> {
        match self.done.try_recv() {
            Ok(()) => Some(true),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(false),
        }
    }
}

/// Speech output for a locale.
pub trait Synthesizer: Send + Sync {
    /// Speaks `text`, cancelling whatever this synthesizer is speaking.
    fn speak(&self, text: &str, locale: Locale) -> VoiceResult<Utterance>;

    /// Cancels the active utterance. Calling it while silent does nothing.
    fn cancel(&self);

    /// Returns false while the synthesizer cannot speak yet.
    fn is_ready(&self) -> bool {
        true
    }
}

/// A voice offered by a speech backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47 language tag as reported by the platform (`id-ID`, `en_US`, ...).
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Platform text-to-speech engine.
pub trait SpeechBackend: Send + Sync {
    fn voices(&self) -> Vec<Voice>;

    fn speak(&self, text: &str, voice: &Voice) -> VoiceResult<Utterance>;

    fn cancel(&self);
}

/// Picks a backend voice matching the locale, or delegates to a fallback.
pub struct LocaleSynthesizer {
    backend: Arc<dyn SpeechBackend>,
    fallback: Option<Arc<dyn Synthesizer>>,
}

impl LocaleSynthesizer {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            fallback: None,
        }
    }

    /// Uses `fallback` for locales the backend has no voice for.
    pub fn with_fallback(mut self, fallback: Arc<dyn Synthesizer>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Returns the backend voice for `locale`, preferring an exact tag match.
    pub fn voice_for(&self, locale: Locale) -> Option<Voice> {
        let tag = normalize_tag(locale.speech_tag());
        let voices = self.backend.voices();

        voices
            .iter()
            .find(|voice| normalize_tag(&voice.lang) == tag)
            .or_else(|| voices.iter().find(|voice| tag_matches(&voice.lang, &tag)))
            .cloned()
    }
}

impl Synthesizer for LocaleSynthesizer {
    fn speak(&self, text: &str, locale: Locale) -> VoiceResult<Utterance> {
        self.cancel();

        let spoken = markup::speech_text(text);
        if spoken.is_empty() {
            return Ok(Utterance::completed());
        }

        if let Some(voice) = self.voice_for(locale) {
            tracing::debug!("[LocaleSynthesizer] Speaking with voice '{}' ({})", voice.name, voice.lang);
            return self.backend.speak(&spoken, &voice);
        }

        match &self.fallback {
            Some(fallback) if fallback.is_ready() => {
                tracing::debug!("[LocaleSynthesizer] No {} voice, using fallback", locale.speech_tag());
                fallback.speak(&spoken, locale)
            }
            Some(_) => {
                tracing::warn!("[LocaleSynthesizer] Fallback synthesizer is not ready");
                Err(VoiceError::synthesis_unavailable(locale))
            }
            None => Err(VoiceError::synthesis_unavailable(locale)),
        }
    }

    fn cancel(&self) {
        self.backend.cancel();
        if let Some(fallback) = &self.fallback {
            fallback.cancel();
        }
    }

    fn is_ready(&self) -> bool {
        !self.backend.voices().is_empty()
            || self.fallback.as_ref().is_some_and(|fallback| fallback.is_ready())
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase().replace('_', "-")
}

/// Language-prefix match in either direction: `id` matches `id-ID` and
/// `id-ID` matches `id-ID-x-female`.
fn tag_matches(voice_lang: &str, normalized_tag: &str) -> bool {
    let lang = normalize_tag(voice_lang);
    if lang.is_empty() {
        return false;
    }
    lang == normalized_tag
        || lang.starts_with(&format!("{}-", normalized_tag))
        || normalized_tag.starts_with(&format!("{}-", lang))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock backend recording what it was asked to speak
    struct MockBackend {
        voices: Vec<Voice>,
        spoken: Mutex<Vec<(String, String)>>,
        cancels: AtomicUsize,
    }

    impl MockBackend {
        fn new(voices: Vec<Voice>) -> Arc<Self> {
            Arc::new(Self {
                voices,
                spoken: Mutex::new(Vec::new()),
                cancels: AtomicUsize::new(0),
            })
        }
    }

    impl SpeechBackend for MockBackend {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&self, text: &str, voice: &Voice) -> VoiceResult<Utterance> {
            self.spoken
                .lock()
                .unwrap()
                .push((text.to_string(), voice.name.clone()));
            Ok(Utterance::completed())
        }

        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct MockFallback {
        ready: bool,
        spoken: Mutex<Vec<(String, Locale)>>,
    }

    impl Synthesizer for MockFallback {
        fn speak(&self, text: &str, locale: Locale) -> VoiceResult<Utterance> {
            self.spoken.lock().unwrap().push((text.to_string(), locale));
            Ok(Utterance::completed())
        }

        fn cancel(&self) {}

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    fn fallback(ready: bool) -> Arc<MockFallback> {
        Arc::new(MockFallback {
            ready,
            spoken: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_voice_matching_ignores_case_and_separator() {
        let backend = MockBackend::new(vec![
            Voice::new("Samantha", "en-US"),
            Voice::new("Damayanti", "ID_id"),
        ]);
        let synth = LocaleSynthesizer::new(backend);

        assert_eq!(synth.voice_for(Locale::Id).unwrap().name, "Damayanti");
        assert_eq!(synth.voice_for(Locale::En).unwrap().name, "Samantha");
    }

    #[test]
    fn test_voice_matching_prefers_exact_then_prefix() {
        let backend = MockBackend::new(vec![
            Voice::new("Generic English", "en"),
            Voice::new("US English", "en-US"),
            Voice::new("Indonesian Wavenet", "id-ID-Wavenet-A"),
        ]);
        let synth = LocaleSynthesizer::new(backend);

        assert_eq!(synth.voice_for(Locale::En).unwrap().name, "US English");
        assert_eq!(synth.voice_for(Locale::Id).unwrap().name, "Indonesian Wavenet");
    }

    #[test]
    fn test_other_languages_do_not_match() {
        let backend = MockBackend::new(vec![Voice::new("Indian English", "en-IN"), Voice::new("x", "")]);
        let synth = LocaleSynthesizer::new(backend);
        assert!(synth.voice_for(Locale::En).is_none());
        assert!(synth.voice_for(Locale::Id).is_none());
    }

    #[test]
    fn test_speak_cancels_first_and_normalizes_markup() {
        let backend = MockBackend::new(vec![Voice::new("Samantha", "en-US")]);
        let synth = LocaleSynthesizer::new(Arc::clone(&backend) as Arc<dyn SpeechBackend>);

        synth.speak("Take care. <br> Stay healthy!", Locale::En).unwrap();

        assert_eq!(backend.cancels.load(Ordering::SeqCst), 1);
        let spoken = backend.spoken.lock().unwrap();
        assert_eq!(spoken[0], ("Take care. Stay healthy!".to_string(), "Samantha".to_string()));
    }

    #[test]
    fn test_missing_voice_uses_ready_fallback() {
        let backend = MockBackend::new(vec![Voice::new("Samantha", "en-US")]);
        let fallback = fallback(true);
        let synth = LocaleSynthesizer::new(Arc::clone(&backend) as Arc<dyn SpeechBackend>)
            .with_fallback(Arc::clone(&fallback) as Arc<dyn Synthesizer>);

        synth.speak("Halo", Locale::Id).unwrap();

        assert!(backend.spoken.lock().unwrap().is_empty());
        assert_eq!(
            fallback.spoken.lock().unwrap().as_slice(),
            &[("Halo".to_string(), Locale::Id)]
        );
    }

    #[test]
    fn test_missing_voice_without_fallback_is_unavailable() {
        let synth = LocaleSynthesizer::new(MockBackend::new(vec![Voice::new("Samantha", "en-US")]));
        let err = synth.speak("Halo", Locale::Id).unwrap_err();
        assert_eq!(err, VoiceError::synthesis_unavailable(Locale::Id));
    }

    #[test]
    fn test_fallback_not_ready_is_unavailable() {
        let fallback = fallback(false);
        let synth = LocaleSynthesizer::new(MockBackend::new(Vec::new()))
            .with_fallback(Arc::clone(&fallback) as Arc<dyn Synthesizer>);

        assert!(synth.speak("Halo", Locale::Id).unwrap_err().is_synthesis_unavailable());
        assert!(fallback.spoken.lock().unwrap().is_empty());
        assert!(!synth.is_ready());
    }

    #[tokio::test]
    async fn test_utterance_completion_and_cancellation() {
        assert!(Utterance::completed().finished().await);

        let (completion, utterance) = Utterance::pending();
        drop(completion);
        assert!(!utterance.finished().await);

        let (completion, mut utterance) = Utterance::pending();
        assert_eq!(utterance.try_finished(), None);
        completion.complete();
        assert_eq!(utterance.try_finished(), Some(true));
    }
}
