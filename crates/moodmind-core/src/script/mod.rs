//! Script domain module.
//!
//! # Module Structure
//!
//! - `model`: Turns, content and the validated `Script`
//! - `strings`: Localized UI string tables
//! - `lexicons`: Seed keyword lexicons per locale
//! - `verdict`: Risk categories, thresholds and verdict copy
//! - `catalog`: Locale-independent structure and the `ScriptCatalog`

mod catalog;
mod lexicons;
mod model;
mod strings;
mod verdict;

pub use catalog::{SCREENING_STRUCTURE, ScriptCatalog, TurnSpec, build_script};
pub use lexicons::LexiconKind;
pub use model::{Branch, Content, Script, Scoring, Template, Turn};
pub use strings::{HELP_KEYS, StringTable, builtin_strings};
pub use verdict::{RiskCategory, RiskThresholds, VerdictCopy};
