//! Text to sentiment classification.
//!
//! Order of evaluation, first match wins:
//! 1. blank input is neutral
//! 2. exact-match short answers ("no", "yes", ...) get fixed scores
//! 3. detect the language, translate non-English text to English
//! 4. average both polarity scorers and map the mean onto [`Sentiment`]
//!
//! Detection and translation failures never abort a classification: the text
//! is scored untranslated and the failure is recorded as a [`Degradation`].

use serde::Serialize;

use crate::core::language::{DetectionError, Language, LanguageDetector};
use crate::core::sentiment::{PatternScorer, PolarityScorer, ScoreError, Sentiment, ValenceScorer};
use crate::core::translate::Translator;

/// Short answers that mean "no".
pub const NEGATIVE_SHORT_ANSWERS: &[&str] = &["no", "nah", "not really", "never"];
/// Short answers that mean "yes".
pub const POSITIVE_SHORT_ANSWERS: &[&str] = &["yes", "yeah", "sure", "definitely"];

pub const NEGATIVE_SHORT_ANSWER_SCORE: f64 = -0.3;
pub const POSITIVE_SHORT_ANSWER_SCORE: f64 = 0.3;

/// Unrecoverable failure; aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("sentiment scorer unavailable: {0}")]
    ScorerUnavailable(#[from] ScoreError),
}

/// A recovered failure while preparing text for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Degradation {
    /// Language could not be determined; the text was scored as-is.
    DetectionInconclusive,
    /// Translation failed; the untranslated text was scored.
    TranslationFailed { language: String, reason: String },
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Degradation::DetectionInconclusive => {
                write!(f, "language not detected, scored as written")
            }
            Degradation::TranslationFailed { language, reason } => {
                write!(f, "translation from '{}' failed ({}), scored as written", language, reason)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    /// Full-precision score; round only for display.
    pub score: f64,
    /// Detected language, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degradation: Option<Degradation>,
}

impl Classification {
    fn fixed(sentiment: Sentiment, score: f64) -> Self {
        Self {
            sentiment,
            score,
            language: None,
            degradation: None,
        }
    }
}

/// Sentiment classifier.
///
/// Built once per run and shared by reference; every component is immutable
/// and `Send + Sync`, so cells can be classified in parallel.
pub struct Classifier {
    detector: LanguageDetector,
    translator: Box<dyn Translator>,
    scorers: [Box<dyn PolarityScorer>; 2],
}

impl Classifier {
    /// Classifier with the default valence and pattern scorers.
    pub fn new(translator: Box<dyn Translator>) -> Self {
        Self::with_scorers(
            translator,
            Box::new(ValenceScorer::new()),
            Box::new(PatternScorer::new()),
        )
    }

    pub fn with_scorers(
        translator: Box<dyn Translator>,
        first: Box<dyn PolarityScorer>,
        second: Box<dyn PolarityScorer>,
    ) -> Self {
        Self {
            detector: LanguageDetector::new(),
            translator,
            scorers: [first, second],
        }
    }

    pub fn classify(&self, text: Option<&str>) -> Result<Classification, FatalError> {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(Classification::fixed(Sentiment::Neutral, 0.0));
        };

        let normalized = text.to_lowercase();

        if NEGATIVE_SHORT_ANSWERS.contains(&normalized.as_str()) {
            return Ok(Classification::fixed(
                Sentiment::Negative,
                NEGATIVE_SHORT_ANSWER_SCORE,
            ));
        }
        if POSITIVE_SHORT_ANSWERS.contains(&normalized.as_str()) {
            return Ok(Classification::fixed(
                Sentiment::Positive,
                POSITIVE_SHORT_ANSWER_SCORE,
            ));
        }

        let (english, language, degradation) = self.to_english(normalized);

        let mut total = 0.0;
        for scorer in &self.scorers {
            total += scorer.polarity(&english)?;
        }
        let score = total / self.scorers.len() as f64;

        Ok(Classification {
            sentiment: Sentiment::from_score(score),
            score,
            language,
            degradation,
        })
    }

    /// Convenience wrapper for a present string.
    pub fn classify_text(&self, text: &str) -> Result<Classification, FatalError> {
        self.classify(Some(text))
    }

    fn to_english(&self, text: String) -> (String, Option<Language>, Option<Degradation>) {
        let language = match self.detector.detect(&text) {
            Ok(language) => language,
            Err(DetectionError::NoLetters | DetectionError::Inconclusive) => {
                return (text, None, Some(Degradation::DetectionInconclusive));
            }
        };

        if language.is_english() {
            return (text, Some(language), None);
        }

        match self.translator.translate(&text, language) {
            Ok(translated) => (translated.to_lowercase(), Some(language), None),
            Err(err) => {
                let degradation = Degradation::TranslationFailed {
                    language: language.code().to_string(),
                    reason: err.to_string(),
                };
                (text, Some(language), Some(degradation))
            }
        }
    }
}
