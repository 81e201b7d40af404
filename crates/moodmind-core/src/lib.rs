//! Domain layer for MoodMind.
//!
//! This crate holds the screening dialogue itself: the supported locales,
//! keyword lexicons and the sentiment scorer, the multilingual script
//! catalog, the verdict thresholds and the dialogue engine that drives a
//! session from the first question to the verdict.
//!
//! Nothing in here performs audio or terminal I/O. Voice output and input
//! live behind the port defined in `moodmind-interaction`.

pub mod config;
pub mod error;
pub mod locale;
pub mod script;
pub mod sentiment;
pub mod session;

// Re-export common types
pub use config::AppConfig;
pub use error::{MoodmindError, Result};
pub use locale::Locale;
