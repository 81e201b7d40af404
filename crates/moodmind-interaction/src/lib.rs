//! Voice I/O and session control for MoodMind.
//!
//! `voice` defines the speech port the platform plugs into. `SessionController`
//! combines it with the dialogue engine from `moodmind-core` into the façade
//! a UI drives.

mod controller;
mod event;
pub mod voice;

pub use controller::{SessionController, StartOutcome, SubmitOutcome, Submission};
pub use event::SessionEvent;
