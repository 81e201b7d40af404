//! Session domain module.
//!
//! This module contains the session state model and the dialogue engine that
//! drives a screening session through its script.
//!
//! # Module Structure
//!
//! - `model`: Session state (`SessionState`, `SessionStatus`, `ScoredResponse`)
//! - `message`: Transcript entry types (`MessageRole`, `TranscriptEntry`)
//! - `engine`: The state machine (`DialogueEngine`)
//!
//! # Usage
//!
//! ```ignore
//! use moodmind_core::session::{DialogueEngine, Advance, SessionStatus};
//! ```

mod engine;
mod message;
mod model;


// Re-export public API
pub use engine::{Advance, DialogueEngine};
pub use message::{MessageRole, TranscriptEntry};
pub use model::{RenderedTurn, ScoredResponse, SessionState, SessionStatus};
