//! Supported dialogue locales.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{MoodmindError, Result};

/// A locale the screening script is available in.
///
/// The set is closed: every variant must have a full script, a string table
/// and one lexicon per scoring turn in the catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    /// Bahasa Indonesia, the default locale.
    #[default]
    Id,
    /// English.
    En,
}

impl Locale {
    /// Parses a short locale code (`id`, `en`), case-insensitively.
    pub fn parse(code: &str) -> Result<Self> {
        Self::from_str(code.trim())
            .map_err(|_| MoodmindError::invalid_input(format!("Unsupported locale '{}'", code)))
    }

    /// Returns the short code (`id`, `en`).
    pub fn code(self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::En => "en",
        }
    }

    /// Returns the BCP-47 tag used to pick speech voices.
    pub fn speech_tag(self) -> &'static str {
        match self {
            Locale::Id => "id-ID",
            Locale::En => "en-US",
        }
    }

    /// Lowercases text the way this locale expects.
    ///
    /// Neither Indonesian nor English has special casing rules, so the
    /// Unicode default mapping applies to both.
    pub fn fold_case(self, text: &str) -> String {
        match self {
            Locale::Id | Locale::En => text.to_lowercase(),
        }
    }

    /// All supported locales, in declaration order.
    pub fn all() -> Vec<Locale> {
        Locale::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Locale::parse("ID").unwrap(), Locale::Id);
        assert_eq!(Locale::parse(" en ").unwrap(), Locale::En);
    }

    #[test]
    fn test_parse_unknown_is_invalid_input() {
        let err = Locale::parse("fr").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_speech_tags() {
        assert_eq!(Locale::Id.speech_tag(), "id-ID");
        assert_eq!(Locale::En.speech_tag(), "en-US");
    }

    #[test]
    fn test_display_matches_code() {
        for locale in Locale::all() {
            assert_eq!(locale.to_string(), locale.code());
            assert_eq!(locale.as_ref(), locale.code());
        }
    }

    #[test]
    fn test_default_is_indonesian() {
        assert_eq!(Locale::default(), Locale::Id);
    }
}
