//! Lexicon-based sentiment scoring.
//!
//! # Module Structure
//!
//! - `lexicon`: Keyword → polarity maps (`KeywordLexicon`)
//! - `scorer`: The pure scoring function (`score`) and its result (`SentimentScore`)

mod lexicon;
mod scorer;

pub use lexicon::KeywordLexicon;
pub use scorer::{ScoreFn, SentimentScore, score, tokenize};
