use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{MoodmindError, Result};

/// A mapping from token to integer polarity weight.
///
/// Keys are stored trimmed and lowercased, so lookups are case-insensitive.
/// Negative weights form the negative bucket and positive weights the
/// positive bucket; zero weights are not allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordLexicon {
    weights: BTreeMap<String, i32>,
}

impl KeywordLexicon {
    /// Builds a lexicon from `(token, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ScriptIntegrity` when a token is blank, has a zero weight, or
    /// collides with another token after normalization.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut weights = BTreeMap::new();

        for (token, weight) in pairs {
            let key = normalize_key(token);
            if key.is_empty() {
                return Err(MoodmindError::script_integrity(
                    "Lexicon contains a blank token",
                ));
            }
            if weight == 0 {
                return Err(MoodmindError::script_integrity(format!(
                    "Lexicon token '{}' has zero weight",
                    key
                )));
            }
            if weights.insert(key.clone(), weight).is_some() {
                return Err(MoodmindError::script_integrity(format!(
                    "Lexicon token '{}' is defined twice",
                    key
                )));
            }
        }

        Ok(Self { weights })
    }

    /// Returns the weight for `token`, if it is part of the lexicon.
    pub fn weight(&self, token: &str) -> Option<i32> {
        self.weights.get(&normalize_key(token)).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Tokens with a negative weight, in key order.
    pub fn negative_tokens(&self) -> impl Iterator<Item = &str> {
        self.weights
            .iter()
            .filter(|(_, weight)| **weight < 0)
            .map(|(token, _)| token.as_str())
    }

    /// Tokens with a positive weight, in key order.
    pub fn positive_tokens(&self) -> impl Iterator<Item = &str> {
        self.weights
            .iter()
            .filter(|(_, weight)| **weight > 0)
            .map(|(token, _)| token.as_str())
    }
}

fn normalize_key(token: &str) -> String {
    token.trim().to_lowercase()
}
