use serde::{Deserialize, Serialize};

use super::lexicon::KeywordLexicon;
use crate::error::{MoodmindError, Result};
use crate::locale::Locale;

/// Signature of a sentiment scorer the dialogue engine can be given.
pub type ScoreFn = fn(&str, Option<&KeywordLexicon>, Locale) -> Result<SentimentScore>;

/// Result of scoring one reply against a lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Sum of the weights of every matched token.
    pub score: i32,
    /// Matched tokens with a positive weight, in order of appearance.
    pub positive: Vec<String>,
    /// Matched tokens with a negative weight, in order of appearance.
    pub negative: Vec<String>,
    /// All tokens of the normalized reply.
    pub tokens: Vec<String>,
}

impl SentimentScore {
    /// Tokens that matched the lexicon, in order of appearance.
    pub fn matched_tokens(&self, lexicon: &KeywordLexicon) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|token| lexicon.weight(token).is_some())
            .cloned()
            .collect()
    }

    /// Score divided by the number of tokens (0 for an empty reply).
    pub fn comparative(&self) -> f64 {
        if self.tokens.is_empty() {
            0.0
        } else {
            f64::from(self.score) / self.tokens.len() as f64
        }
    }
}

/// Splits `text` into normalized tokens.
///
/// The text is lowercased with the locale's casing rules, every character
/// that is not a letter, a digit, `-` or `'` becomes a separator, and
/// separators at the edges of a token are dropped.
pub fn tokenize(text: &str, locale: Locale) -> Vec<String> {
    let folded = locale.fold_case(text);
    let spaced: String = folded
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();

    spaced
        .split_whitespace()
        .map(|token| token.trim_matches(|c| c == '-' || c == '\''))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Scores `text` against `lexicon`.
///
/// Every token found in the lexicon contributes its weight once per
/// occurrence. There is no negation handling, stemming or weighting.
///
/// # Errors
///
/// Returns `InvalidInput` when no lexicon is supplied.
pub fn score(text: &str, lexicon: Option<&KeywordLexicon>, locale: Locale) -> Result<SentimentScore> {
    let lexicon = lexicon
        .ok_or_else(|| MoodmindError::invalid_input("No lexicon supplied for scoring"))?;

    let tokens = tokenize(text, locale);
    let mut result = SentimentScore::default();

    for token in &tokens {
        if let Some(weight) = lexicon.weight(token) {
            result.score += weight;
            if weight > 0 {
                result.positive.push(token.clone());
            } else {
                result.negative.push(token.clone());
            }
        }
    }

    result.tokens = tokens;
    Ok(result)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '\''
}
