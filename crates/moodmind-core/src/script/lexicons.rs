//! Seed keyword lexicons for the builtin screening script.
//!
//! Lexicon contents are locale data. The engine only ever looks at the
//! integer score they produce.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::locale::Locale;
use crate::sentiment::KeywordLexicon;

/// The kinds of lexicon a scoring turn can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconKind {
    /// Mood and interest words for the open-ended questions.
    Affect,
    /// Yes/no answers, with "yes" weighted positive.
    Affirmation,
    /// Answers to "is it still manageable?".
    Coping,
    /// Answers to "does it interfere with your life?", with "yes" weighted negative.
    Impact,
}

impl LexiconKind {
    /// Builds the seed lexicon of this kind for `locale`.
    pub fn build(self, locale: Locale) -> Result<KeywordLexicon> {
        KeywordLexicon::from_pairs(self.seed(locale).iter().copied())
    }

    fn seed(self, locale: Locale) -> &'static [(&'static str, i32)] {
        match (locale, self) {
            (Locale::Id, LexiconKind::Affect) => ID_AFFECT,
            (Locale::Id, LexiconKind::Affirmation) => ID_AFFIRMATION,
            (Locale::Id, LexiconKind::Coping) => ID_COPING,
            (Locale::Id, LexiconKind::Impact) => ID_IMPACT,
            (Locale::En, LexiconKind::Affect) => EN_AFFECT,
            (Locale::En, LexiconKind::Affirmation) => EN_AFFIRMATION,
            (Locale::En, LexiconKind::Coping) => EN_COPING,
            (Locale::En, LexiconKind::Impact) => EN_IMPACT,
        }
    }
}

const ID_AFFECT: &[(&str, i32)] = &[
    ("sedih", -2),
    ("cemas", -2),
    ("lelah", -1),
    ("capek", -1),
    ("bersalah", -2),
    ("takut", -2),
    ("khawatir", -2),
    ("gelisah", -2),
    ("stres", -2),
    ("murung", -2),
    ("hampa", -2),
    ("kesepian", -2),
    ("kecewa", -2),
    ("depresi", -3),
    ("buruk", -2),
    ("malas", -1),
    ("bosan", -1),
    ("galau", -1),
    ("marah", -1),
    ("baik", 2),
    ("senang", 2),
    ("bahagia", 2),
    ("gembira", 2),
    ("semangat", 2),
    ("bersemangat", 2),
    ("antusias", 2),
    ("tenang", 1),
    ("tertarik", 1),
    ("sehat", 1),
    ("lega", 1),
];

const ID_AFFIRMATION: &[(&str, i32)] = &[
    ("ya", 1),
    ("iya", 1),
    ("betul", 1),
    ("benar", 1),
    ("pernah", 1),
    ("sering", 1),
    ("tidak", -1),
    ("nggak", -1),
    ("gak", -1),
    ("enggak", -1),
    ("tak", -1),
    ("bukan", -1),
    ("belum", -1),
];

const ID_COPING: &[(&str, i32)] = &[
    ("ya", 1),
    ("iya", 1),
    ("bisa", 1),
    ("masih", 1),
    ("mampu", 1),
    ("sanggup", 1),
    ("tidak", -2),
    ("nggak", -2),
    ("gak", -2),
    ("tak", -2),
    ("belum", -1),
    ("sulit", -2),
    ("susah", -2),
];

const ID_IMPACT: &[(&str, i32)] = &[
    ("ya", -1),
    ("iya", -1),
    ("betul", -1),
    ("benar", -1),
    ("tidak", 1),
    ("nggak", 1),
    ("gak", 1),
    ("enggak", 1),
    ("tak", 1),
    ("bukan", 1),
];

const EN_AFFECT: &[(&str, i32)] = &[
    ("sad", -2),
    ("anxious", -2),
    ("tired", -1),
    ("exhausted", -2),
    ("guilty", -2),
    ("afraid", -2),
    ("scared", -2),
    ("worried", -2),
    ("stressed", -2),
    ("hopeless", -3),
    ("depressed", -3),
    ("lonely", -2),
    ("empty", -2),
    ("bad", -2),
    ("down", -1),
    ("bored", -1),
    ("lazy", -1),
    ("angry", -1),
    ("good", 2),
    ("happy", 2),
    ("great", 2),
    ("fine", 1),
    ("okay", 1),
    ("calm", 1),
    ("excited", 2),
    ("motivated", 2),
    ("enthusiastic", 2),
    ("interested", 1),
    ("healthy", 1),
];

const EN_AFFIRMATION: &[(&str, i32)] = &[
    ("yes", 1),
    ("yeah", 1),
    ("yep", 1),
    ("sure", 1),
    ("often", 1),
    ("no", -1),
    ("nope", -1),
    ("not", -1),
    ("never", -1),
];

const EN_COPING: &[(&str, i32)] = &[
    ("yes", 1),
    ("yeah", 1),
    ("can", 1),
    ("still", 1),
    ("manageable", 1),
    ("able", 1),
    ("no", -2),
    ("not", -2),
    ("cannot", -2),
    ("can't", -2),
    ("hard", -2),
    ("difficult", -2),
];

const EN_IMPACT: &[(&str, i32)] = &[
    ("yes", -1),
    ("yeah", -1),
    ("yep", -1),
    ("definitely", -1),
    ("no", 1),
    ("nope", 1),
    ("not", 1),
    ("never", 1),
];
