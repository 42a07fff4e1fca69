//! Opinion-word averaging scorer.
//!
//! Every opinion word found in the text becomes an assessment. A preceding
//! intensifier multiplies it, a preceding negation multiplies it by `-0.5`,
//! and a directly following `!` strengthens it. The score is the mean of all
//! assessments, clamped to `[-1, 1]`.

use std::collections::{HashMap, HashSet};

use super::{PolarityScorer, ScoreError, Token, tokenize};

const NEGATION_FACTOR: f64 = -0.5;
const EXCLAMATION_FACTOR: f64 = 1.25;

#[rustfmt::skip]
const POLARITIES: &[(&str, f64)] = &[
    // positive
    ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("amazing", 0.6),
    ("awesome", 1.0), ("best", 1.0), ("better", 0.5), ("nice", 0.6),
    ("helpful", 0.5), ("useful", 0.3), ("clear", 0.1), ("interesting", 0.5),
    ("enjoyable", 0.5), ("happy", 0.8), ("glad", 0.5), ("perfect", 1.0),
    ("fantastic", 0.4), ("wonderful", 1.0), ("fun", 0.3), ("easy", 0.43),
    ("engaging", 0.4), ("informative", 0.5), ("satisfied", 0.5), ("fine", 0.42),
    ("brilliant", 0.9), ("outstanding", 0.5), ("superb", 1.0), ("impressive", 1.0),
    ("impressed", 1.0), ("supportive", 0.5), ("friendly", 0.38), ("kind", 0.6),
    ("patient", 0.3), ("knowledgeable", 0.6), ("effective", 0.6), ("efficient", 0.4),
    ("valuable", 0.5), ("beneficial", 0.5), ("inspiring", 0.5), ("pleasant", 0.73),
    ("cool", 0.35), ("positive", 0.23), ("successful", 0.75), ("smooth", 0.4),
    ("fair", 0.7), ("comfortable", 0.4), ("confident", 0.5), ("creative", 0.5),
    ("excited", 0.38), ("exciting", 0.3), ("favorite", 0.5), ("favourite", 0.5),
    ("organized", 0.2), ("organised", 0.2), ("relevant", 0.4), ("love", 0.5),
    ("loved", 0.7), ("enjoyed", 0.5), ("well", 0.2), ("ok", 0.5), ("okay", 0.5),
    ("thanks", 0.2), ("wow", 0.1),
    // negative
    ("bad", -0.7), ("terrible", -1.0), ("awful", -1.0), ("horrible", -1.0),
    ("worst", -1.0), ("boring", -1.0), ("bored", -0.5), ("poor", -0.4),
    ("poorly", -0.4), ("confusing", -0.3), ("confused", -0.4), ("difficult", -0.5),
    ("hard", -0.29), ("useless", -0.5), ("slow", -0.3), ("disappointed", -0.75),
    ("disappointing", -0.6), ("sad", -0.5), ("unclear", -0.2), ("annoying", -0.8),
    ("annoyed", -0.4), ("worse", -0.4), ("lacking", -0.2), ("rude", -0.3),
    ("angry", -0.5), ("frustrating", -0.4), ("frustrated", -0.7), ("stressful", -0.5),
    ("lazy", -0.25), ("messy", -0.5), ("unhappy", -0.6), ("pointless", -0.5),
    ("unfair", -0.5), ("weak", -0.38), ("wrong", -0.5), ("complicated", -0.5),
    ("tedious", -0.5), ("dull", -0.31), ("ugly", -0.7), ("pathetic", -1.0),
    ("tired", -0.4), ("exhausting", -0.4), ("overwhelming", -0.2), ("late", -0.3),
    ("negative", -0.3), ("painful", -0.7), ("worried", -0.3), ("unhelpful", -0.5),
    ("hate", -0.8), ("hated", -0.9), ("waste", -0.2),
];

#[rustfmt::skip]
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.2), ("extremely", 1.5), ("absolutely", 1.4),
    ("so", 1.2), ("super", 1.3), ("highly", 1.3), ("incredibly", 1.5),
    ("totally", 1.3), ("completely", 1.3), ("truly", 1.2), ("too", 1.2),
    ("quite", 1.1), ("most", 1.3), ("slightly", 0.6), ("somewhat", 0.7),
    ("fairly", 0.8), ("rather", 0.8), ("barely", 0.4), ("little", 0.6),
];

#[rustfmt::skip]
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nothing", "none", "without",
    "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent",
    "werent", "wont", "wouldnt", "shouldnt", "couldnt", "hardly",
];

/// Opinion-word averaging scorer.
pub struct PatternScorer {
    polarities: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for PatternScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternScorer {
    pub fn new() -> Self {
        Self {
            polarities: POLARITIES.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    /// Mean polarity of all assessments, `0.0` when there are none.
    pub fn score(&self, text: &str) -> f64 {
        let mut assessments: Vec<f64> = Vec::new();
        let mut negated = false;
        let mut intensity: Option<f64> = None;
        // Whether the previous token produced the last assessment.
        let mut after_assessment = false;

        for token in tokenize(text) {
            match token {
                Token::Word(word) => {
                    let word = word.as_str();
                    if self.is_negation(word) {
                        negated = true;
                        after_assessment = false;
                    } else if let Some(&factor) = self.intensifiers.get(word) {
                        intensity = Some(intensity.unwrap_or(1.0) * factor);
                        after_assessment = false;
                    } else if let Some(&polarity) = self.polarities.get(word) {
                        let mut value = polarity * intensity.take().unwrap_or(1.0);
                        if negated {
                            value *= NEGATION_FACTOR;
                            negated = false;
                        }
                        assessments.push(value.clamp(-1.0, 1.0));
                        after_assessment = true;
                    } else {
                        // Modifiers only reach the opinion word right after them.
                        negated = false;
                        intensity = None;
                        after_assessment = false;
                    }
                }
                Token::Exclamation(_) => {
                    if after_assessment && let Some(last) = assessments.last_mut() {
                        *last = (*last * EXCLAMATION_FACTOR).clamp(-1.0, 1.0);
                    }
                    after_assessment = false;
                }
                Token::Question(_) => {
                    negated = false;
                    intensity = None;
                    after_assessment = false;
                }
            }
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for PatternScorer {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn polarity(&self, text: &str) -> Result<f64, ScoreError> {
        Ok(self.score(text))
    }
}
