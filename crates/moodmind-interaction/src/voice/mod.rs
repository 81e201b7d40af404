//! Voice I/O port.
//!
//! # Module Structure
//!
//! - `recognizer`: Speech-to-text trait and its event type
//! - `synthesizer`: Text-to-speech traits, `Utterance` and `LocaleSynthesizer`
//! - `markup`: Normalization of `<br>` style markup
//! - `error`: `VoiceError` and recognition error kinds

mod error;
pub mod markup;
mod recognizer;
mod synthesizer;

pub use error::{RecognitionErrorKind, VoiceError, VoiceResult};
pub use recognizer::{RecognitionEvent, RecognitionSink, Recognizer};
pub use synthesizer::{Completion, LocaleSynthesizer, SpeechBackend, Synthesizer, Utterance, Voice};
