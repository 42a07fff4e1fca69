//! Polarity scoring and the sentiment category scale.
//!
//! Two independent scorers map English text to a polarity in `[-1, 1]`:
//! - [`ValenceScorer`]: valence-aware lexicon model with boosters, negation
//!   dampening and a normalised compound score.
//! - [`PatternScorer`]: averages the polarity of opinion words, with
//!   intensity modifiers and negation flipping.
//!
//! The classifier averages both and maps the mean onto [`Sentiment`].

mod pattern;
mod valence;

pub use pattern::PatternScorer;
pub use valence::ValenceScorer;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ============================================================
// Sentiment Scale
// ============================================================

/// Five-step sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sentiment {
    #[serde(rename = "Very Negative")]
    VeryNegative,
    #[serde(rename = "Negative")]
    Negative,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Very Positive")]
    VeryPositive,
}

impl Sentiment {
    /// All categories, from most negative to most positive.
    pub const ALL: [Sentiment; 5] = [
        Sentiment::VeryNegative,
        Sentiment::Negative,
        Sentiment::Neutral,
        Sentiment::Positive,
        Sentiment::VeryPositive,
    ];

    /// Map a score onto the category scale.
    ///
    /// Bands are checked top-down: `>= 0.7`, `[0.2, 0.7)`, `(-0.2, 0.2)`,
    /// `(-0.7, -0.2]`, and everything else (including NaN) is very negative.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            Sentiment::VeryPositive
        } else if (0.2..0.7).contains(&score) {
            Sentiment::Positive
        } else if score > -0.2 && score < 0.2 {
            Sentiment::Neutral
        } else if score > -0.7 && score <= -0.2 {
            Sentiment::Negative
        } else {
            Sentiment::VeryNegative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::VeryNegative => "Very Negative",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
            Sentiment::VeryPositive => "Very Positive",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================
// Scorer Trait
// ============================================================

/// Failure of a scoring backend. Not recoverable per cell.
#[derive(Debug, thiserror::Error)]
#[error("{scorer} scorer failed: {reason}")]
pub struct ScoreError {
    pub scorer: &'static str,
    pub reason: String,
}

/// A model mapping English text to a polarity in `[-1, 1]`.
pub trait PolarityScorer: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    fn polarity(&self, text: &str) -> Result<f64, ScoreError>;
}

// ============================================================
// Tokenization
// ============================================================

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*|!+|\?+").expect("token regex is valid")
});

/// A word or a run of `!`/`?` marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Word(String),
    Exclamation(usize),
    Question(usize),
}

/// Split text into lower-cased words and punctuation emphasis runs.
///
/// Apostrophes inside words are kept (`don't`), typographic ones are folded
/// to ASCII.
pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let s = m.as_str();
            if s.starts_with('!') {
                Token::Exclamation(s.len())
            } else if s.starts_with('?') {
                Token::Question(s.len())
            } else {
                Token::Word(s.to_lowercase().replace('’', "'"))
            }
        })
        .collect()
}
