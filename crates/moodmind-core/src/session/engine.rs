use std::sync::Arc;

use super::message::TranscriptEntry;
use super::model::{RenderedTurn, ScoredResponse, SessionState, SessionStatus};
use crate::error::{MoodmindError, Result};
use crate::locale::Locale;
use crate::script::{RiskCategory, ScriptCatalog};
use crate::sentiment::{self, ScoreFn};

/// Outcome of submitting a user reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The reply was blank after trimming. Nothing changed.
    NoOp,
    /// The session moved to a turn that awaits a reply.
    Next(RenderedTurn),
    /// The session moved to its terminal turn (the verdict) and is finished.
    Final(RenderedTurn),
    /// A branch pointed past the end of the script. The session is finished
    /// without a further turn.
    Ended,
}

impl Advance {
    /// The rendered assistant turn, if the submission produced one.
    pub fn turn(&self) -> Option<&RenderedTurn> {
        match self {
            Advance::Next(turn) | Advance::Final(turn) => Some(turn),
            Advance::NoOp | Advance::Ended => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Advance::Final(_) | Advance::Ended)
    }
}

/// Drives a screening session through its script.
///
/// The engine is a synchronous state transformer: every operation either
/// applies a complete transition or returns an error and leaves the state
/// exactly as it was.
pub struct DialogueEngine {
    catalog: Arc<ScriptCatalog>,
    scorer: ScoreFn,
    state: SessionState,
}

impl DialogueEngine {
    /// Creates an idle engine using the lexicon scorer.
    pub fn new(catalog: Arc<ScriptCatalog>, locale: Locale) -> Self {
        Self {
            catalog,
            scorer: sentiment::score,
            state: SessionState::new(locale),
        }
    }

    /// Replaces the scoring function.
    pub fn with_scorer(mut self, scorer: ScoreFn) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn catalog(&self) -> &Arc<ScriptCatalog> {
        &self.catalog
    }

    pub fn locale(&self) -> Locale {
        self.state.locale
    }

    /// Switches the locale of the next session.
    ///
    /// # Errors
    ///
    /// - `LocaleLocked` unless the engine is idle
    /// - `InvalidInput` if the catalog has no script for `locale`
    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        if self.state.status != SessionStatus::Idle {
            return Err(MoodmindError::locale_locked(self.state.locale));
        }
        self.catalog.script(locale)?;
        self.state.locale = locale;
        tracing::debug!("[DialogueEngine] Locale set to {}", locale);
        Ok(())
    }

    /// Verdict category for the current score.
    pub fn risk_category(&self) -> RiskCategory {
        let score = self.state.depression_score;
        match self.catalog.script(self.state.locale) {
            Ok(script) => script.classify(score),
            Err(_) => self.catalog.classify(score),
        }
    }

    /// Starts a session in `locale` and returns the first turn.
    ///
    /// # Errors
    ///
    /// - `OutOfSequence` unless the engine is idle
    /// - `InvalidInput` if the catalog has no script for `locale`
    pub fn start(&mut self, locale: Locale) -> Result<RenderedTurn> {
        self.ensure_status("start", SessionStatus::Idle)?;

        let script = self.catalog.script(locale)?;
        let first = script
            .turn(0)
            .ok_or_else(|| MoodmindError::script_integrity("Script has no first turn"))?;
        let text = first.content.render(0);

        let status = if script.is_terminal(0) {
            SessionStatus::Finished
        } else {
            SessionStatus::AwaitingUser
        };

        self.state = SessionState {
            locale,
            turn_index: 0,
            depression_score: 0,
            transcript: vec![TranscriptEntry::assistant(text.clone())],
            responses: Vec::new(),
            status,
        };

        tracing::debug!("[DialogueEngine] Started session: locale={}, turns={}", locale, script.len());

        Ok(RenderedTurn { index: 0, text })
    }

    /// Submits the user's reply to the current turn.
    ///
    /// The reply is trimmed; a blank reply is a no-op. Otherwise the reply is
    /// scored (for scoring turns), the score is raised by one if the reply
    /// indicates risk, and the session advances to the next turn.
    ///
    /// # Errors
    ///
    /// - `OutOfSequence` unless the engine awaits a reply
    /// - `ScriptIntegrity` if a branch returns an index before the current
    ///   turn or past the end of the script
    /// - any error of the scoring function
    pub fn submit(&mut self, user_text: &str) -> Result<Advance> {
        self.ensure_status("submit", SessionStatus::AwaitingUser)?;

        let trimmed = user_text.trim();
        if trimmed.is_empty() {
            return Ok(Advance::NoOp);
        }

        let locale = self.state.locale;
        let index = self.state.turn_index;
        let script = self.catalog.script(locale)?;
        let turn = script.turn(index).ok_or_else(|| {
            MoodmindError::script_integrity(format!("Current turn {} is outside the script", index))
        })?;

        // Compute the whole transition before touching the state.
        let mut score = self.state.depression_score;
        let mut response = None;

        if let Some(scoring) = &turn.scoring {
            let sentiment = (self.scorer)(trimmed, Some(&scoring.keywords), locale)?;
            if scoring.indicates_risk(sentiment.score) {
                score += 1;
            }
            tracing::debug!(
                "[DialogueEngine] Turn {} scored {} (reverse={}), depression_score={}",
                index,
                sentiment.score,
                scoring.reverse,
                score
            );
            response = Some(ScoredResponse {
                turn_index: index,
                raw_text: trimmed.to_string(),
                score: sentiment.score,
                matched_tokens: sentiment.matched_tokens(&scoring.keywords),
            });
        }

        let next = turn.next_index(score);
        if next < index || next > script.len() {
            tracing::error!(
                "[DialogueEngine] Branch of turn {} returned {} (script length {})",
                index,
                next,
                script.len()
            );
            return Err(MoodmindError::script_integrity(format!(
                "Branch of turn {} returned {}, expected a value in [{}, {}]",
                index,
                next,
                index,
                script.len()
            )));
        }

        let rendered = match script.turn(next) {
            Some(next_turn) => Some(RenderedTurn {
                index: next,
                text: next_turn.content.render(score),
            }),
            None => None,
        };
        let terminal = script.is_terminal(next);

        // Commit.
        self.state.transcript.push(TranscriptEntry::user(trimmed));
        if let Some(response) = response {
            self.state.responses.push(response);
        }
        self.state.depression_score = score;

        let Some(rendered) = rendered else {
            self.state.status = SessionStatus::Finished;
            tracing::info!("[DialogueEngine] Session ended after turn {}: depression_score={}", index, score);
            return Ok(Advance::Ended);
        };

        self.state.turn_index = next;
        self.state
            .transcript
            .push(TranscriptEntry::assistant(rendered.text.clone()));

        if terminal {
            self.state.status = SessionStatus::Finished;
            tracing::info!(
                "[DialogueEngine] Session finished: depression_score={}, category={:?}",
                score,
                self.risk_category()
            );
            Ok(Advance::Final(rendered))
        } else {
            Ok(Advance::Next(rendered))
        }
    }

    /// Text of the most recent assistant utterance, used for replay.
    pub fn peek_last_assistant(&self) -> Option<&str> {
        self.state.last_assistant_text()
    }

    /// Discards the session and returns to idle, keeping the locale.
    pub fn reset(&mut self) {
        tracing::debug!("[DialogueEngine] Reset from status {}", self.state.status);
        self.state = SessionState::new(self.state.locale);
    }

    fn ensure_status(&self, operation: &str, expected: SessionStatus) -> Result<()> {
        if self.state.status == expected {
            Ok(())
        } else {
            tracing::warn!(
                "[DialogueEngine] '{}' called while {} (expected {})",
                operation,
                self.state.status,
                expected
            );
            Err(MoodmindError::out_of_sequence(operation, self.state.status))
        }
    }
}
