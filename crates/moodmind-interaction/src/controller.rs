//! Session controller.
//!
//! The controller is the single entry point a UI drives. It owns the dialogue
//! engine and the voice port handles, runs every engine transition to
//! completion before any audio starts, and reports asynchronous voice
//! activity as `SessionEvent`s.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use moodmind_core::Locale;
use moodmind_core::Result;
use moodmind_core::script::{RiskCategory, ScriptCatalog};
use moodmind_core::session::{Advance, DialogueEngine, SessionState, SessionStatus};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::event::SessionEvent;
use crate::voice::{RecognitionEvent, Recognizer, Synthesizer, Utterance};

/// Result of starting a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartOutcome {
    pub initial_turn_text: String,
    pub locale: Locale,
}

/// Result of an accepted reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// The reply as recorded in the transcript.
    pub user_echoed: String,
    pub next_assistant_text: Option<String>,
    pub finished: bool,
    /// Accumulated risk score.
    pub score: u32,
    /// Verdict category, once the session is finished.
    pub verdict: Option<RiskCategory>,
}

/// Result of `SessionController::submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Submission {
    /// The reply was blank. Nothing changed.
    NoOp,
    Accepted(SubmitOutcome),
}

/// Drives one screening session at a time.
pub struct SessionController {
    session_id: Uuid,
    engine: DialogueEngine,
    recognizer: Arc<dyn Recognizer>,
    synthesizer: Arc<dyn Synthesizer>,
    events: mpsc::UnboundedSender<SessionEvent>,
    recognition_tx: mpsc::UnboundedSender<RecognitionEvent>,
    recognition_rx: mpsc::UnboundedReceiver<RecognitionEvent>,
    listening: bool,
    draft: Option<String>,
    voice_enabled: bool,
    speaking: Arc<AtomicBool>,
    /// Bumped on every speak and stop so that a stale completion watcher
    /// never clears a newer utterance.
    generation: Arc<AtomicU64>,
    /// Utterance being played when no Tokio runtime is available to watch it.
    unwatched: Option<Utterance>,
}

impl SessionController {
    /// Creates an idle controller.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Scripts for every supported locale
    /// * `locale` - Locale of the first session
    /// * `recognizer` - Speech-to-text input
    /// * `synthesizer` - Speech output
    /// * `events` - Channel the UI receives `SessionEvent`s on
    pub fn new(
        catalog: Arc<ScriptCatalog>,
        locale: Locale,
        recognizer: Arc<dyn Recognizer>,
        synthesizer: Arc<dyn Synthesizer>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let (recognition_tx, recognition_rx) = mpsc::unbounded_channel();

        Self {
            session_id: Uuid::new_v4(),
            engine: DialogueEngine::new(catalog, locale),
            recognizer,
            synthesizer,
            events,
            recognition_tx,
            recognition_rx,
            listening: false,
            draft: None,
            voice_enabled: true,
            speaking: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            unwatched: None,
        }
    }

    /// Enables or disables spoken output.
    pub fn with_voice(mut self, enabled: bool) -> Self {
        self.voice_enabled = enabled;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn locale(&self) -> Locale {
        self.engine.locale()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    /// Turns spoken output on or off. Turning it off stops current audio.
    pub fn set_voice_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.stop_speaking();
        }
        self.voice_enabled = enabled;
    }

    /// Session status as the UI sees it: `Speaking` while audio plays during
    /// an active session, otherwise the engine status.
    pub fn status(&self) -> SessionStatus {
        let status = self.engine.status();
        if status == SessionStatus::AwaitingUser && self.is_speaking() {
            SessionStatus::Speaking
        } else {
            status
        }
    }

    /// A copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.engine.state().clone()
    }

    pub fn risk_category(&self) -> RiskCategory {
        self.engine.risk_category()
    }

    /// Starts a session and speaks the first question.
    pub fn start(&mut self) -> Result<StartOutcome> {
        let locale = self.engine.locale();
        let first = self.engine.start(locale)?;

        tracing::info!("[SessionController] Session {} started in '{}'", self.session_id, locale);
        self.speak(&first.text);

        Ok(StartOutcome {
            initial_turn_text: first.text,
            locale,
        })
    }

    /// Submits a typed or dictated reply.
    ///
    /// Blank replies are a no-op. An accepted reply stops listening, advances
    /// the engine and then speaks the next turn.
    pub fn submit(&mut self, text: &str) -> Result<Submission> {
        let advance = self.engine.submit(text)?;
        if advance == Advance::NoOp {
            return Ok(Submission::NoOp);
        }

        self.stop_listening();
        self.discard_recognition();

        let finished = advance.is_finished();
        let next_assistant_text = advance.turn().map(|turn| turn.text.clone());
        let state = self.engine.state();
        let outcome = SubmitOutcome {
            user_echoed: text.trim().to_string(),
            next_assistant_text,
            finished,
            score: state.depression_score,
            verdict: finished.then(|| self.engine.risk_category()),
        };

        if let Some(next) = &outcome.next_assistant_text {
            self.speak(next);
        }
        if finished {
            tracing::info!(
                "[SessionController] Session {} finished: score={}, verdict={:?}",
                self.session_id,
                outcome.score,
                outcome.verdict
            );
        }

        Ok(Submission::Accepted(outcome))
    }

    /// Starts or stops the recognizer. Returns whether it is now listening.
    ///
    /// A recognizer that fails to start is reported as a `RecognitionError`
    /// event and leaves listening off.
    pub fn toggle_listening(&mut self) -> bool {
        if self.listening {
            self.stop_listening();
            return false;
        }

        let locale = self.engine.locale();
        match self.recognizer.start(locale, self.recognition_tx.clone()) {
            Ok(()) => {
                tracing::debug!("[SessionController] Listening in '{}'", locale.speech_tag());
                self.listening = true;
            }
            Err(err) => {
                tracing::warn!("[SessionController] Recognizer failed to start: {}", err);
                self.emit(SessionEvent::RecognitionError {
                    kind: err.recognition_kind(),
                    message: err.to_string(),
                });
            }
        }
        self.listening
    }

    /// Speaks the most recent assistant turn again.
    pub fn replay_last(&mut self) -> Option<String> {
        let text = self.engine.peek_last_assistant()?.to_string();
        self.speak(&text);
        Some(text)
    }

    /// Cancels audio output. Session state is not touched.
    pub fn stop_speaking(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.synthesizer.cancel();
        self.unwatched = None;
        if self.speaking.swap(false, Ordering::SeqCst) {
            self.emit(SessionEvent::SpeakingChanged { speaking: false });
        }
    }

    /// Stops voice I/O and discards the session.
    pub fn reset(&mut self) {
        self.stop_listening();
        self.stop_speaking();
        self.engine.reset();
        self.discard_recognition();
        self.session_id = Uuid::new_v4();
        tracing::debug!("[SessionController] Reset, new session {}", self.session_id);
    }

    /// Changes the locale of the next session. Only allowed while idle.
    pub fn change_locale(&mut self, locale: Locale) -> Result<()> {
        self.engine.set_locale(locale)?;
        tracing::info!("[SessionController] Locale changed to '{}'", locale);
        Ok(())
    }

    /// Processes pending recognizer events and synthesis completion.
    ///
    /// Transcripts replace the draft; errors are forwarded and terminal ones
    /// stop listening. Returns the number of recognizer events handled.
    pub fn pump_recognition(&mut self) -> usize {
        self.poll_unwatched();

        let mut handled = 0;
        while let Ok(event) = self.recognition_rx.try_recv() {
            handled += 1;
            match event {
                RecognitionEvent::Transcript { transcript, is_final } => {
                    tracing::trace!("[SessionController] Transcript (final={}): {}", is_final, transcript);
                    self.draft = Some(transcript.clone());
                    self.emit(SessionEvent::PartialTranscript { text: transcript });
                }
                RecognitionEvent::Error { kind, message } => {
                    tracing::warn!("[SessionController] Recognition error {}: {}", kind, message);
                    if kind.is_terminal() {
                        self.listening = false;
                    }
                    self.emit(SessionEvent::RecognitionError { kind, message });
                }
            }
        }
        handled
    }

    /// Hands the recognized draft to the UI, clearing it.
    pub fn take_draft(&mut self) -> Option<String> {
        self.draft.take()
    }

    fn stop_listening(&mut self) {
        if self.listening {
            self.recognizer.stop();
            self.listening = false;
        }
    }

    /// Clears the draft and any transcripts queued before the recognizer
    /// stopped, so they never leak into the next question.
    fn discard_recognition(&mut self) {
        self.draft = None;
        let mut dropped = 0;
        while self.recognition_rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::debug!("[SessionController] Discarded {} queued recognizer events", dropped);
        }
    }

    fn speak(&mut self, text: &str) {
        if !self.voice_enabled {
            return;
        }

        let locale = self.engine.locale();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.unwatched = None;

        match self.synthesizer.speak(text, locale) {
            Ok(utterance) => {
                if !self.speaking.swap(true, Ordering::SeqCst) {
                    self.emit(SessionEvent::SpeakingChanged { speaking: true });
                }
                self.watch(utterance, generation);
            }
            Err(err) => {
                tracing::warn!("[SessionController] Speech output failed: {}", err);
                if self.speaking.swap(false, Ordering::SeqCst) {
                    self.emit(SessionEvent::SpeakingChanged { speaking: false });
                }
                if err.is_synthesis_unavailable() {
                    self.emit(SessionEvent::SynthesisUnavailable { locale });
                }
            }
        }
    }

    fn watch(&mut self, utterance: Utterance, generation: u64) {
        let Ok(handle) = Handle::try_current() else {
            self.unwatched = Some(utterance);
            return;
        };

        let speaking = Arc::clone(&self.speaking);
        let current = Arc::clone(&self.generation);
        let events = self.events.clone();

        handle.spawn(async move {
            let completed = utterance.finished().await;
            if current.load(Ordering::SeqCst) == generation && speaking.swap(false, Ordering::SeqCst) {
                tracing::debug!("[SessionController] Utterance {} ended (completed={})", generation, completed);
                let _ = events.send(SessionEvent::SpeakingChanged { speaking: false });
            }
        });
    }

    fn poll_unwatched(&mut self) {
        let Some(utterance) = self.unwatched.as_mut() else {
            return;
        };
        if utterance.try_finished().is_some() {
            self.unwatched = None;
            if self.speaking.swap(false, Ordering::SeqCst) {
                self.emit(SessionEvent::SpeakingChanged { speaking: false });
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("[SessionController] Event receiver dropped");
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if self.listening {
            self.recognizer.stop();
        }
        if self.speaking.load(Ordering::SeqCst) {
            self.synthesizer.cancel();
        }
    }
}
