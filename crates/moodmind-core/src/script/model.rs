//! Script building blocks: turns, their content and the validated script.

use std::fmt;
use std::sync::Arc;

use super::verdict::{RiskCategory, RiskThresholds};
use crate::error::{MoodmindError, Result};
use crate::locale::Locale;
use crate::sentiment::KeywordLexicon;

/// Branching rule `(score, index) → next index`.
///
/// A branch must return an index in `[index, script length]`; returning the
/// script length ends the session.
pub type Branch = fn(u32, usize) -> usize;

/// Score-parameterized content renderer.
pub type Template = Arc<dyn Fn(u32) -> String + Send + Sync>;

/// The text of an assistant turn.
#[derive(Clone)]
pub enum Content {
    /// Fixed text.
    Static(String),
    /// Text rendered from the current depression score (the verdict).
    Templated(Template),
}

impl Content {
    /// Renders the content for the given score.
    pub fn render(&self, score: u32) -> String {
        match self {
            Content::Static(text) => text.clone(),
            Content::Templated(template) => template(score),
        }
    }

    pub fn is_templated(&self) -> bool {
        matches!(self, Content::Templated(_))
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Content::Templated(_) => f.write_str("Templated(..)"),
        }
    }
}

/// Scoring rule attached to a turn that expects a user reply.
#[derive(Debug, Clone)]
pub struct Scoring {
    /// Lexicon the reply is scored against.
    pub keywords: KeywordLexicon,
    /// When set, a positive score counts as a risk indicator.
    pub reverse: bool,
}

impl Scoring {
    /// Returns true when a reply with sentiment `score` raises the risk score.
    ///
    /// A score of exactly zero never counts, whatever the direction.
    pub fn indicates_risk(&self, score: i32) -> bool {
        if self.reverse { score > 0 } else { score < 0 }
    }
}

/// One scripted assistant turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub index: usize,
    pub content: Content,
    pub scoring: Option<Scoring>,
    pub branch: Option<Branch>,
}

impl Turn {
    /// Creates a turn with fixed text and no reply expectation.
    pub fn prompt(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            content: Content::Static(text.into()),
            scoring: None,
            branch: None,
        }
    }

    /// Creates a turn rendered from the score.
    pub fn templated<F>(index: usize, template: F) -> Self
    where
        F: Fn(u32) -> String + Send + Sync + 'static,
    {
        Self {
            index,
            content: Content::Templated(Arc::new(template)),
            scoring: None,
            branch: None,
        }
    }

    /// Makes this turn expect a reply scored against `keywords`.
    pub fn scored(mut self, keywords: KeywordLexicon, reverse: bool) -> Self {
        self.scoring = Some(Scoring { keywords, reverse });
        self
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = Some(branch);
        self
    }

    /// Returns true when the user is expected to answer this turn.
    pub fn expects_reply(&self) -> bool {
        self.scoring.is_some()
    }

    pub fn keywords(&self) -> Option<&KeywordLexicon> {
        self.scoring.as_ref().map(|scoring| &scoring.keywords)
    }

    pub fn is_reverse(&self) -> bool {
        self.scoring.as_ref().is_some_and(|scoring| scoring.reverse)
    }

    /// Index the session moves to after this turn.
    pub fn next_index(&self, score: u32) -> usize {
        match self.branch {
            Some(branch) => branch(score, self.index),
            None => self.index + 1,
        }
    }
}

/// An ordered, validated sequence of turns for one locale.
#[derive(Debug, Clone)]
pub struct Script {
    locale: Locale,
    turns: Vec<Turn>,
    /// Boundaries the verdict turn was rendered with.
    thresholds: RiskThresholds,
}

impl Script {
    /// Validates and wraps `turns`.
    ///
    /// # Errors
    ///
    /// Returns `ScriptIntegrity` if the script is empty, if a turn's index
    /// differs from its position, if a scoring turn has an empty lexicon, or
    /// if the last turn expects a reply.
    pub fn new(locale: Locale, turns: Vec<Turn>) -> Result<Self> {
        let Some(last) = turns.last() else {
            return Err(MoodmindError::script_integrity(format!(
                "Script for '{}' has no turns",
                locale
            )));
        };

        if last.expects_reply() {
            return Err(MoodmindError::script_integrity(format!(
                "Last turn of the '{}' script expects a reply",
                locale
            )));
        }

        for (position, turn) in turns.iter().enumerate() {
            if turn.index != position {
                return Err(MoodmindError::script_integrity(format!(
                    "Turn at position {} of the '{}' script has index {}",
                    position, locale, turn.index
                )));
            }
            if turn.keywords().is_some_and(KeywordLexicon::is_empty) {
                return Err(MoodmindError::script_integrity(format!(
                    "Scoring turn {} of the '{}' script has an empty lexicon",
                    position, locale
                )));
            }
        }

        Ok(Self {
            locale,
            turns,
            thresholds: RiskThresholds::default(),
        })
    }

    /// Records the thresholds the verdict content classifies with.
    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    pub fn classify(&self, score: u32) -> RiskCategory {
        self.thresholds.classify(score)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns true if `index` is the final turn and it expects no reply.
    pub fn is_terminal(&self, index: usize) -> bool {
        index + 1 == self.turns.len()
            && self
                .turns
                .get(index)
                .is_some_and(|turn| !turn.expects_reply() && turn.branch.is_none())
    }
}
