use moodmind_core::Locale;
use moodmind_core::script::{RiskCategory, ScriptCatalog};
use moodmind_core::session::{MessageRole, SessionStatus};
use moodmind_interaction::voice::{
    Completion, RecognitionErrorKind, RecognitionEvent, RecognitionSink, Recognizer, Synthesizer,
    Utterance, VoiceError, VoiceResult,
};
use moodmind_interaction::{SessionController, SessionEvent, Submission};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

// Mock recognizer that keeps the sink so tests can push events
#[derive(Default)]
struct MockRecognizer {
    starts: Mutex<Vec<Locale>>,
    stops: Mutex<usize>,
    sink: Mutex<Option<RecognitionSink>>,
    fail_with: Option<VoiceError>,
}

impl MockRecognizer {
    fn failing(kind: RecognitionErrorKind) -> Self {
        Self {
            fail_with: Some(VoiceError::recognition(kind, "microphone unavailable")),
            ..Self::default()
        }
    }

    fn push(&self, event: RecognitionEvent) {
        let sink = self.sink.lock().unwrap();
        sink.as_ref().unwrap().send(event).unwrap();
    }

    fn stops(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

impl Recognizer for MockRecognizer {
    fn start(&self, locale: Locale, sink: RecognitionSink) -> VoiceResult<()> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.starts.lock().unwrap().push(locale);
        *self.sink.lock().unwrap() = Some(sink);
        Ok(())
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

// Mock synthesizer holding every completion until the test releases it
#[derive(Default)]
struct MockSynthesizer {
    spoken: Mutex<Vec<(String, Locale)>>,
    completions: Mutex<Vec<Completion>>,
    cancels: Mutex<usize>,
    unavailable: bool,
}

impl MockSynthesizer {
    fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn spoken(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    fn finish_latest(&self) {
        if let Some(completion) = self.completions.lock().unwrap().pop() {
            completion.complete();
        }
    }

    fn cancels(&self) -> usize {
        *self.cancels.lock().unwrap()
    }
}

impl Synthesizer for MockSynthesizer {
    fn speak(&self, text: &str, locale: Locale) -> VoiceResult<Utterance> {
        if self.unavailable {
            return Err(VoiceError::synthesis_unavailable(locale));
        }
        self.spoken.lock().unwrap().push((text.to_string(), locale));
        let (completion, utterance) = Utterance::pending();
        self.completions.lock().unwrap().push(completion);
        Ok(utterance)
    }

    fn cancel(&self) {
        *self.cancels.lock().unwrap() += 1;
        // Dropping the completions cancels their utterances.
        self.completions.lock().unwrap().clear();
    }
}

struct Fixture {
    controller: SessionController,
    recognizer: Arc<MockRecognizer>,
    synthesizer: Arc<MockSynthesizer>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl Fixture {
    fn new(locale: Locale) -> Self {
        Self::with(locale, MockRecognizer::default(), MockSynthesizer::default())
    }

    fn with(locale: Locale, recognizer: MockRecognizer, synthesizer: MockSynthesizer) -> Self {
        let catalog = Arc::new(ScriptCatalog::builtin().unwrap());
        let recognizer = Arc::new(recognizer);
        let synthesizer = Arc::new(synthesizer);
        let (tx, events) = mpsc::unbounded_channel();
        let controller = SessionController::new(
            catalog,
            locale,
            Arc::clone(&recognizer) as Arc<dyn Recognizer>,
            Arc::clone(&synthesizer) as Arc<dyn Synthesizer>,
            tx,
        );
        Self {
            controller,
            recognizer,
            synthesizer,
            events,
        }
    }

    fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

#[test]
fn test_start_speaks_first_question() {
    let mut fx = Fixture::new(Locale::En);

    let outcome = fx.controller.start().unwrap();
    assert_eq!(outcome.locale, Locale::En);
    assert_eq!(
        outcome.initial_turn_text,
        "In the past 2 weeks, how have you been feeling?"
    );
    assert_eq!(fx.synthesizer.spoken(), vec![outcome.initial_turn_text.clone()]);
    assert_eq!(
        fx.drain_events(),
        vec![SessionEvent::SpeakingChanged { speaking: true }]
    );
    assert_eq!(fx.controller.status(), SessionStatus::Speaking);
}

#[test]
fn test_start_twice_is_out_of_sequence() {
    let mut fx = Fixture::new(Locale::Id);
    fx.controller.start().unwrap();
    assert!(fx.controller.start().unwrap_err().is_out_of_sequence());
    assert_eq!(fx.synthesizer.spoken().len(), 1);
}

#[test]
fn test_submit_advances_before_speaking() {
    let mut fx = Fixture::new(Locale::Id);
    fx.controller.start().unwrap();

    let Submission::Accepted(outcome) = fx.controller.submit("  saya sedih  ").unwrap() else {
        panic!("expected an accepted reply");
    };
    assert_eq!(outcome.user_echoed, "saya sedih");
    assert!(!outcome.finished);
    assert_eq!(outcome.score, 1);
    assert_eq!(outcome.verdict, None);

    let next = outcome.next_assistant_text.unwrap();
    let snapshot = fx.controller.snapshot();
    assert_eq!(snapshot.turn_index, 1);
    assert_eq!(snapshot.last_assistant_text(), Some(next.as_str()));
    assert_eq!(fx.synthesizer.spoken().last(), Some(&next));
}

#[test]
fn test_blank_submit_is_noop() {
    let mut fx = Fixture::new(Locale::Id);
    fx.controller.start().unwrap();
    let before = fx.controller.snapshot();

    assert_eq!(fx.controller.submit("   ").unwrap(), Submission::NoOp);
    assert_eq!(fx.controller.snapshot(), before);
    assert_eq!(fx.synthesizer.spoken().len(), 1);
}

#[test]
fn test_full_session_reports_verdict() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();

    let answers = ["sad", "bored", "yes", "yes", "no", "no", "no", "no", "yes", "no"];
    let mut last = None;
    for answer in answers {
        last = Some(fx.controller.submit(answer).unwrap());
    }

    let Some(Submission::Accepted(outcome)) = last else {
        panic!("expected an accepted reply");
    };
    assert!(outcome.finished);
    assert_eq!(outcome.score, 4);
    assert_eq!(outcome.verdict, Some(RiskCategory::SuspectedDepression));
    assert!(outcome.next_assistant_text.unwrap().contains("Suspected Depression"));
    assert_eq!(fx.controller.status(), SessionStatus::Finished);
    assert!(fx.controller.submit("yes").unwrap_err().is_out_of_sequence());
}

#[test]
fn test_locale_is_locked_during_session() {
    let mut fx = Fixture::new(Locale::Id);
    fx.controller.change_locale(Locale::En).unwrap();
    assert_eq!(fx.controller.locale(), Locale::En);

    fx.controller.start().unwrap();
    let err = fx.controller.change_locale(Locale::Id).unwrap_err();
    assert!(err.is_locale_locked());
    assert_eq!(fx.controller.locale(), Locale::En);

    fx.controller.reset();
    fx.controller.change_locale(Locale::Id).unwrap();
    let outcome = fx.controller.start().unwrap();
    assert_eq!(outcome.locale, Locale::Id);
    assert_eq!(fx.synthesizer.spoken.lock().unwrap().last().unwrap().1, Locale::Id);
}

#[test]
fn test_replay_speaks_last_turn_again() {
    let mut fx = Fixture::new(Locale::En);
    assert_eq!(fx.controller.replay_last(), None);

    let outcome = fx.controller.start().unwrap();
    let replayed = fx.controller.replay_last().unwrap();
    assert_eq!(replayed, outcome.initial_turn_text);
    assert_eq!(fx.synthesizer.spoken(), vec![replayed.clone(), replayed]);
}

#[test]
fn test_stop_speaking_keeps_session() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();
    let before = fx.controller.snapshot();
    fx.drain_events();

    fx.controller.stop_speaking();
    assert!(!fx.controller.is_speaking());
    assert_eq!(fx.synthesizer.cancels(), 1);
    assert_eq!(
        fx.drain_events(),
        vec![SessionEvent::SpeakingChanged { speaking: false }]
    );
    assert_eq!(fx.controller.snapshot(), before);
    assert_eq!(fx.controller.status(), SessionStatus::AwaitingUser);

    // Idempotent.
    fx.controller.stop_speaking();
    assert!(fx.drain_events().is_empty());
}

#[test]
fn test_muted_controller_stays_silent() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.set_voice_enabled(false);

    fx.controller.start().unwrap();
    fx.controller.submit("fine").unwrap();
    assert!(fx.controller.replay_last().is_some());

    assert!(fx.synthesizer.spoken().is_empty());
    assert!(fx.drain_events().is_empty());
}

#[test]
fn test_synthesis_unavailable_does_not_stop_session() {
    let mut fx = Fixture::with(
        Locale::Id,
        MockRecognizer::default(),
        MockSynthesizer::unavailable(),
    );

    fx.controller.start().unwrap();
    assert_eq!(
        fx.drain_events(),
        vec![SessionEvent::SynthesisUnavailable { locale: Locale::Id }]
    );
    assert!(matches!(
        fx.controller.submit("sedih").unwrap(),
        Submission::Accepted(_)
    ));
    assert_eq!(fx.controller.status(), SessionStatus::AwaitingUser);
}

#[test]
fn test_toggle_listening_starts_and_stops() {
    let mut fx = Fixture::new(Locale::Id);

    assert!(fx.controller.toggle_listening());
    assert!(fx.controller.is_listening());
    assert_eq!(fx.recognizer.starts.lock().unwrap().as_slice(), &[Locale::Id]);

    assert!(!fx.controller.toggle_listening());
    assert_eq!(fx.recognizer.stops(), 1);
}

#[test]
fn test_failed_recognizer_reports_error() {
    let mut fx = Fixture::with(
        Locale::En,
        MockRecognizer::failing(RecognitionErrorKind::NotSupported),
        MockSynthesizer::default(),
    );

    assert!(!fx.controller.toggle_listening());
    let events = fx.drain_events();
    assert!(matches!(
        events.as_slice(),
        [SessionEvent::RecognitionError { kind: RecognitionErrorKind::NotSupported, .. }]
    ));
}

#[test]
fn test_transcripts_replace_draft() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();
    fx.controller.toggle_listening();
    fx.drain_events();

    fx.recognizer.push(RecognitionEvent::Transcript {
        transcript: "I feel".to_string(),
        is_final: false,
    });
    fx.recognizer.push(RecognitionEvent::Transcript {
        transcript: "I feel tired".to_string(),
        is_final: true,
    });

    assert_eq!(fx.controller.pump_recognition(), 2);
    let partials: Vec<_> = fx
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            SessionEvent::PartialTranscript { text } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(partials, vec!["I feel", "I feel tired"]);
    assert_eq!(fx.controller.take_draft().as_deref(), Some("I feel tired"));
    assert_eq!(fx.controller.take_draft(), None);
}

#[test]
fn test_terminal_recognition_error_stops_listening() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.toggle_listening();

    fx.recognizer.push(RecognitionEvent::Error {
        kind: RecognitionErrorKind::NoSpeech,
        message: "silence".to_string(),
    });
    fx.controller.pump_recognition();
    assert!(fx.controller.is_listening());

    fx.recognizer.push(RecognitionEvent::Error {
        kind: RecognitionErrorKind::NotAllowed,
        message: "permission denied".to_string(),
    });
    fx.controller.pump_recognition();
    assert!(!fx.controller.is_listening());

    let kinds: Vec<_> = fx
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            SessionEvent::RecognitionError { kind, .. } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![RecognitionErrorKind::NoSpeech, RecognitionErrorKind::NotAllowed]
    );
}

#[test]
fn test_submit_stops_listening() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();
    fx.controller.toggle_listening();

    fx.controller.submit("fine").unwrap();
    assert!(!fx.controller.is_listening());
    assert_eq!(fx.recognizer.stops(), 1);
}

#[test]
fn test_submit_discards_queued_transcripts() {
    let mut fx = Fixture::new(Locale::Id);
    fx.controller.start().unwrap();
    fx.controller.toggle_listening();
    fx.recognizer.push(RecognitionEvent::Transcript {
        transcript: "saya sedih".to_string(),
        is_final: true,
    });

    fx.controller.submit("saya sedih").unwrap();
    fx.drain_events();

    assert_eq!(fx.controller.pump_recognition(), 0);
    assert_eq!(fx.controller.take_draft(), None);
    assert!(
        !fx.drain_events()
            .iter()
            .any(|event| matches!(event, SessionEvent::PartialTranscript { .. }))
    );
}

#[test]
fn test_reset_discards_session_and_voice() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();
    fx.controller.toggle_listening();
    let first_id = fx.controller.session_id();

    fx.controller.reset();
    assert_eq!(fx.controller.status(), SessionStatus::Idle);
    assert!(fx.controller.snapshot().transcript.is_empty());
    assert!(!fx.controller.is_listening());
    assert!(!fx.controller.is_speaking());
    assert_eq!(fx.recognizer.stops(), 1);
    assert_ne!(fx.controller.session_id(), first_id);
}

#[test]
fn test_completion_is_seen_without_runtime() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();
    fx.drain_events();

    fx.controller.pump_recognition();
    assert!(fx.controller.is_speaking());

    fx.synthesizer.finish_latest();
    fx.controller.pump_recognition();
    assert!(!fx.controller.is_speaking());
    assert_eq!(
        fx.drain_events(),
        vec![SessionEvent::SpeakingChanged { speaking: false }]
    );
}

#[test]
fn test_drop_releases_voice_io() {
    let fx = Fixture::new(Locale::En);
    let recognizer = Arc::clone(&fx.recognizer);
    let synthesizer = Arc::clone(&fx.synthesizer);
    let Fixture { mut controller, .. } = fx;

    controller.start().unwrap();
    controller.toggle_listening();
    drop(controller);

    assert_eq!(recognizer.stops(), 1);
    assert_eq!(synthesizer.cancels(), 1);
}

#[test]
fn test_snapshot_transcript_alternates() {
    let mut fx = Fixture::new(Locale::Id);
    fx.controller.start().unwrap();
    fx.controller.submit("baik").unwrap();

    let roles: Vec<_> = fx
        .controller
        .snapshot()
        .transcript
        .iter()
        .map(|entry| entry.role)
        .collect();
    assert_eq!(
        roles,
        vec![MessageRole::Assistant, MessageRole::User, MessageRole::Assistant]
    );
}

async fn next_event(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> SessionEvent {
    tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event within a second")
        .expect("event channel open")
}

#[tokio::test]
async fn test_watcher_reports_end_of_speech() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();
    assert_eq!(
        next_event(&mut fx.events).await,
        SessionEvent::SpeakingChanged { speaking: true }
    );

    fx.synthesizer.finish_latest();
    assert_eq!(
        next_event(&mut fx.events).await,
        SessionEvent::SpeakingChanged { speaking: false }
    );
    assert!(!fx.controller.is_speaking());
    assert_eq!(fx.controller.status(), SessionStatus::AwaitingUser);
}

#[tokio::test]
async fn test_stale_watcher_does_not_clear_newer_utterance() {
    let mut fx = Fixture::new(Locale::En);
    fx.controller.start().unwrap();
    next_event(&mut fx.events).await;

    // The first utterance is superseded: its completion is dropped unfinished.
    fx.synthesizer.completions.lock().unwrap().clear();
    fx.controller.replay_last().unwrap();
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    assert!(fx.controller.is_speaking());
    assert!(fx.events.try_recv().is_err());

    fx.synthesizer.finish_latest();
    assert_eq!(
        next_event(&mut fx.events).await,
        SessionEvent::SpeakingChanged { speaking: false }
    );
}
