//! The multilingual script catalog.
//!
//! A script is assembled from two parts: a locale-independent structure
//! (turn order, scoring flags, lexicon kinds) and the locale's string table
//! and lexicons. Scripts are immutable once the catalog is built and the
//! catalog is shared behind an `Arc`.

use std::collections::HashMap;

use super::lexicons::LexiconKind;
use super::model::{Script, Turn};
use super::strings::{StringTable, builtin_strings};
use super::verdict::{RiskCategory, RiskThresholds, VerdictCopy};
use crate::error::{MoodmindError, Result};
use crate::locale::Locale;
use crate::sentiment::KeywordLexicon;

/// Structural definition of one turn, shared by every locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnSpec {
    /// A question whose reply is scored.
    Question {
        /// String-table key of the question text.
        key: &'static str,
        lexicon: LexiconKind,
        reverse: bool,
    },
    /// The final verdict, rendered from the score.
    Verdict,
}

const fn question(key: &'static str, lexicon: LexiconKind, reverse: bool) -> TurnSpec {
    TurnSpec::Question { key, lexicon, reverse }
}

/// The screening script: two open mood questions, six yes/no symptom
/// questions where "yes" is the risk answer, two impact follow-ups and the
/// verdict.
pub const SCREENING_STRUCTURE: &[TurnSpec] = &[
    question("question_1", LexiconKind::Affect, false),
    question("question_2", LexiconKind::Affect, false),
    question("question_3", LexiconKind::Affirmation, true),
    question("question_4", LexiconKind::Affirmation, true),
    question("question_5", LexiconKind::Affirmation, true),
    question("question_6", LexiconKind::Affirmation, true),
    question("question_7", LexiconKind::Affirmation, true),
    question("question_8", LexiconKind::Affirmation, true),
    question("question_9", LexiconKind::Coping, false),
    question("question_10", LexiconKind::Impact, false),
    TurnSpec::Verdict,
];

/// Holds one script per supported locale.
#[derive(Debug, Clone)]
pub struct ScriptCatalog {
    scripts: HashMap<Locale, Script>,
    thresholds: RiskThresholds,
}

impl ScriptCatalog {
    /// Builds the builtin screening scripts with the default thresholds.
    pub fn builtin() -> Result<Self> {
        Self::with_thresholds(RiskThresholds::default())
    }

    /// Builds the builtin screening scripts with custom verdict thresholds.
    pub fn with_thresholds(thresholds: RiskThresholds) -> Result<Self> {
        thresholds.validate()?;

        let mut scripts = HashMap::new();
        for locale in Locale::all() {
            let script = build_script(locale, SCREENING_STRUCTURE, builtin_strings(locale), thresholds)?;
            scripts.insert(locale, script);
        }

        tracing::debug!(
            "[ScriptCatalog] Built {} scripts of {} turns",
            scripts.len(),
            SCREENING_STRUCTURE.len()
        );

        Ok(Self { scripts, thresholds })
    }

    /// Wraps already-built scripts, one per locale.
    ///
    /// Locales without a script are reported as unsupported by `script`.
    /// Every script must carry `thresholds`, so that the verdict text and
    /// `classify` agree.
    pub fn from_scripts(scripts: Vec<Script>, thresholds: RiskThresholds) -> Result<Self> {
        thresholds.validate()?;

        let mut by_locale = HashMap::new();
        for script in scripts {
            let locale = script.locale();
            if script.thresholds() != thresholds {
                return Err(MoodmindError::script_integrity(format!(
                    "Script for '{}' classifies with {:?}, catalog uses {:?}",
                    locale,
                    script.thresholds(),
                    thresholds
                )));
            }
            if by_locale.insert(locale, script).is_some() {
                return Err(MoodmindError::script_integrity(format!(
                    "Two scripts supplied for locale '{}'",
                    locale
                )));
            }
        }

        Ok(Self {
            scripts: by_locale,
            thresholds,
        })
    }

    /// Returns the script for `locale`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the catalog has no script for `locale`.
    pub fn script(&self, locale: Locale) -> Result<&Script> {
        self.scripts.get(&locale).ok_or_else(|| {
            MoodmindError::invalid_input(format!("No script available for locale '{}'", locale))
        })
    }

    /// Returns the lexicon of turn `turn_index`, if that turn is scored.
    pub fn lexicon(&self, locale: Locale, turn_index: usize) -> Option<&KeywordLexicon> {
        self.scripts
            .get(&locale)
            .and_then(|script| script.turn(turn_index))
            .and_then(Turn::keywords)
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    pub fn classify(&self, score: u32) -> RiskCategory {
        self.thresholds.classify(score)
    }

    /// Returns the UI string table for `locale`.
    pub fn strings(&self, locale: Locale) -> &'static StringTable {
        builtin_strings(locale)
    }

    /// Locales this catalog has scripts for, sorted.
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<_> = self.scripts.keys().copied().collect();
        locales.sort();
        locales
    }
}

/// Combines `structure` with a locale's strings and lexicons.
pub fn build_script(
    locale: Locale,
    structure: &[TurnSpec],
    strings: &StringTable,
    thresholds: RiskThresholds,
) -> Result<Script> {
    let mut turns = Vec::with_capacity(structure.len());

    for (index, spec) in structure.iter().enumerate() {
        let turn = match *spec {
            TurnSpec::Question { key, lexicon, reverse } => {
                Turn::prompt(index, strings.get(key)?).scored(lexicon.build(locale)?, reverse)
            }
            TurnSpec::Verdict => {
                let copy = VerdictCopy::from_strings(strings)?;
                Turn::templated(index, move |score| copy.render(thresholds.classify(score)))
            }
        };
        turns.push(turn);
    }

    Ok(Script::new(locale, turns)?.with_thresholds(thresholds))
}
