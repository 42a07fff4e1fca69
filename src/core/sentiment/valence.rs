//! Valence-aware lexicon scorer.
//!
//! Word valences are on a `[-4, 4]` scale. Each sentiment word is adjusted by
//! the boosters and negations in the three words before it, sentences are
//! re-weighted around a contrastive "but", and punctuation emphasis is added
//! to the raw sum before it is normalised into `[-1, 1]`.

use std::collections::{HashMap, HashSet};

use super::{PolarityScorer, ScoreError, Token, tokenize};

/// Valence added (or removed) by a booster word.
const BOOSTER_INCREMENT: f64 = 0.293;
const BOOSTER_DECREMENT: f64 = -0.293;

/// Scalar applied to a valence preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;

/// Normalisation constant approximating the max expected raw sum.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Booster dampening by distance from the sentiment word.
const BOOSTER_DISTANCE_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_BOOST: f64 = 0.18;
const QUESTION_BOOST_CAP: f64 = 0.96;

#[rustfmt::skip]
const VALENCES: &[(&str, f64)] = &[
    // positive
    ("good", 1.9), ("great", 3.1), ("excellent", 2.7), ("amazing", 2.8),
    ("awesome", 3.1), ("love", 3.2), ("loved", 2.9), ("loves", 2.7),
    ("like", 2.0), ("liked", 1.8), ("likes", 1.8), ("helpful", 1.8),
    ("useful", 1.9), ("nice", 1.8), ("clear", 1.6), ("clearly", 1.3),
    ("interesting", 1.7), ("interested", 1.7), ("enjoy", 2.2), ("enjoyed", 2.3),
    ("enjoyable", 1.9), ("happy", 2.7), ("glad", 2.0), ("best", 3.2),
    ("better", 1.9), ("perfect", 2.7), ("fantastic", 2.6), ("wonderful", 2.7),
    ("fun", 2.3), ("easy", 1.9), ("engaging", 1.4), ("informative", 1.3),
    ("thanks", 1.9), ("thank", 1.5), ("satisfied", 1.8), ("recommend", 1.5),
    ("well", 1.1), ("ok", 0.9), ("okay", 0.9), ("fine", 0.8),
    ("brilliant", 2.8), ("outstanding", 3.0), ("superb", 3.1), ("impressive", 2.3),
    ("impressed", 2.1), ("supportive", 1.9), ("friendly", 2.2), ("kind", 2.4),
    ("patient", 1.5), ("knowledgeable", 1.5), ("effective", 2.1), ("efficient", 1.8),
    ("valuable", 2.1), ("beneficial", 1.9), ("inspiring", 2.2), ("motivating", 1.8),
    ("improve", 1.9), ("improved", 2.1), ("improvement", 1.6), ("appreciate", 1.7),
    ("appreciated", 2.3), ("pleasant", 2.3), ("cool", 1.3), ("positive", 2.6),
    ("success", 2.7), ("successful", 2.8), ("wow", 2.8), ("yay", 2.4),
    ("good job", 2.2), ("welcome", 2.0), ("smooth", 1.3), ("fair", 1.3),
    ("comfortable", 1.5), ("confident", 2.2), ("creative", 1.9), ("excited", 1.4),
    ("exciting", 2.2), ("favorite", 2.0), ("favourite", 2.0), ("organized", 1.2),
    ("organised", 1.2), ("responsive", 1.2), ("relevant", 1.0), ("worth", 0.9),
    // negative
    ("bad", -2.5), ("terrible", -2.1), ("awful", -2.0), ("horrible", -2.5),
    ("worst", -3.1), ("boring", -1.3), ("bored", -1.1), ("poor", -2.1),
    ("poorly", -2.0), ("hate", -2.7), ("hated", -3.2), ("confusing", -1.3),
    ("confused", -1.3), ("difficult", -1.5), ("hard", -0.4), ("waste", -1.8),
    ("wasted", -2.2), ("useless", -1.8), ("slow", -0.8), ("disappointed", -1.9),
    ("disappointing", -2.2), ("sad", -2.1), ("problem", -1.7), ("problems", -1.7),
    ("unclear", -1.0), ("annoying", -1.7), ("annoyed", -1.6), ("worse", -2.1),
    ("fail", -2.5), ("failed", -2.3), ("failure", -2.3), ("lacking", -0.9),
    ("lack", -1.3), ("rude", -2.0), ("angry", -2.3), ("frustrating", -1.9),
    ("frustrated", -2.4), ("stressful", -1.8), ("stress", -1.8), ("lazy", -1.4),
    ("mess", -1.5), ("messy", -1.5), ("unhappy", -1.8), ("dislike", -1.6),
    ("disliked", -1.7), ("pointless", -1.7), ("unfair", -2.1), ("weak", -1.9),
    ("wrong", -2.1), ("mistake", -1.4), ("mistakes", -1.3), ("complicated", -0.7),
    ("tedious", -1.3), ("dull", -1.7), ("ugly", -2.3), ("sucks", -1.5),
    ("sucked", -2.0), ("pathetic", -2.6), ("disaster", -3.1), ("tired", -1.9),
    ("exhausting", -1.5), ("overwhelming", -1.4), ("never", -0.2), ("late", -0.9),
    ("negative", -2.7), ("painful", -2.4), ("worried", -1.2), ("worry", -1.9),
    ("difficulty", -1.4), ("unhelpful", -1.7), ("ignored", -1.2), ("missing", -1.2),
];

#[rustfmt::skip]
const INCREMENT_BOOSTERS: &[&str] = &[
    "very", "really", "extremely", "absolutely", "so", "super", "highly",
    "incredibly", "totally", "completely", "truly", "especially", "exceptionally",
    "hugely", "immensely", "most", "more", "particularly", "remarkably", "thoroughly",
    "utterly", "quite", "too", "deeply", "greatly", "entirely",
];

#[rustfmt::skip]
const DECREMENT_BOOSTERS: &[&str] = &[
    "slightly", "somewhat", "barely", "marginally", "partly", "little", "less",
    "occasionally", "sort", "kinda", "fairly", "rather", "almost", "scarcely",
];

#[rustfmt::skip]
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "none", "neither", "nor",
    "nowhere", "without", "cannot", "cant", "can't", "don't", "dont", "doesn't",
    "doesnt", "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt", "aren't",
    "arent", "weren't", "werent", "won't", "wont", "wouldn't", "wouldnt",
    "shouldn't", "shouldnt", "couldn't", "couldnt", "hasn't", "hasnt",
    "haven't", "havent", "hadn't", "hadnt", "ain't", "aint", "rarely", "seldom",
];

/// Valence-aware lexicon scorer.
pub struct ValenceScorer {
    valences: HashMap<&'static str, f64>,
    increment_boosters: HashSet<&'static str>,
    decrement_boosters: HashSet<&'static str>,
    negations: HashSet<&'static str>,
}

impl Default for ValenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ValenceScorer {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            increment_boosters: INCREMENT_BOOSTERS.iter().copied().collect(),
            decrement_boosters: DECREMENT_BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Raw valence of a single lexicon entry.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }

    fn booster_scalar(&self, word: &str, valence: f64) -> f64 {
        let scalar = if self.increment_boosters.contains(word) {
            BOOSTER_INCREMENT
        } else if self.decrement_boosters.contains(word) {
            BOOSTER_DECREMENT
        } else {
            return 0.0;
        };
        if valence < 0.0 { -scalar } else { scalar }
    }

    /// Compound score in `[-1, 1]`.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let words: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Word(w) => Some(w.as_str()),
                _ => None,
            })
            .collect();

        let mut sentiments = vec![0.0f64; words.len()];
        let mut i = 0;
        while i < words.len() {
            // Two-word entries ("good job") take precedence over their parts.
            if i + 1 < words.len() {
                let pair = format!("{} {}", words[i], words[i + 1]);
                if let Some(valence) = self.valence(&pair) {
                    sentiments[i] = self.adjust(&words, i, valence);
                    i += 2;
                    continue;
                }
            }
            if let Some(valence) = self.valence(words[i]) {
                // "never" only carries valence when it stands alone.
                if !(self.is_negation(words[i]) && words.len() > 1) {
                    sentiments[i] = self.adjust(&words, i, valence);
                }
            }
            i += 1;
        }

        apply_but_check(&words, &mut sentiments);

        let mut sum: f64 = sentiments.iter().sum();
        if sum != 0.0 {
            let emphasis = punctuation_emphasis(&tokens);
            sum += emphasis.copysign(sum);
        }
        normalize(sum)
    }

    fn adjust(&self, words: &[&str], index: usize, mut valence: f64) -> f64 {
        for (distance, damping) in BOOSTER_DISTANCE_DAMPING.iter().enumerate() {
            let Some(prev) = index.checked_sub(distance + 1) else {
                break;
            };
            let boost = self.booster_scalar(words[prev], valence);
            valence += boost * damping;
        }
        let negated = (1..=3)
            .filter_map(|d| index.checked_sub(d))
            .any(|prev| self.is_negation(words[prev]));
        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

impl PolarityScorer for ValenceScorer {
    fn name(&self) -> &'static str {
        "valence"
    }

    fn polarity(&self, text: &str) -> Result<f64, ScoreError> {
        Ok(self.compound(text))
    }
}

/// Clauses before "but" count half, clauses after it count one and a half.
fn apply_but_check(words: &[&str], sentiments: &mut [f64]) {
    let Some(but_index) = words.iter().position(|w| *w == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < but_index {
            *sentiment *= 0.5;
        } else if i > but_index {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(tokens: &[Token]) -> f64 {
    let exclamations: usize = tokens
        .iter()
        .map(|t| match t {
            Token::Exclamation(n) => *n,
            _ => 0,
        })
        .sum();
    let questions: usize = tokens
        .iter()
        .map(|t| match t {
            Token::Question(n) => *n,
            _ => 0,
        })
        .sum();

    let exclamation_emphasis = exclamations.min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_BOOST;
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_BOOST,
        _ => QUESTION_BOOST_CAP,
    };
    exclamation_emphasis + question_emphasis
}

fn normalize(sum: f64) -> f64 {
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    score.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_single_word_compound() {
        let scorer = ValenceScorer::new();
        // 3.1 / sqrt(3.1^2 + 15)
        assert!(approx(scorer.compound("great job"), 0.6249));
    }

    #[test]
    fn test_no_sentiment_words_is_zero() {
        let scorer = ValenceScorer::new();
        assert_eq!(scorer.compound("the session was on tuesday"), 0.0);
        assert_eq!(scorer.compound(""), 0.0);
    }

    #[test]
    fn test_booster_increases_magnitude() {
        let scorer = ValenceScorer::new();
        let plain = scorer.compound("the class was good");
        let boosted = scorer.compound("the class was very good");
        assert!(boosted > plain);

        let plain_neg = scorer.compound("the class was bad");
        let boosted_neg = scorer.compound("the class was really bad");
        assert!(boosted_neg < plain_neg);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let scorer = ValenceScorer::new();
        let good = scorer.compound("it was good");
        let not_good = scorer.compound("it was not good");
        assert!(good > 0.0);
        assert!(not_good < 0.0);
        assert!(not_good.abs() < good.abs());
        assert!(scorer.compound("it wasn't helpful") < 0.0);
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let scorer = ValenceScorer::new();
        let score = scorer.compound("the content was good but the pace was terrible");
        assert!(score < 0.0);
    }

    #[test]
    fn test_exclamation_adds_emphasis() {
        let scorer = ValenceScorer::new();
        assert!(scorer.compound("great!!") > scorer.compound("great"));
        assert!(scorer.compound("awful!!") < scorer.compound("awful"));
        // Punctuation alone carries no sentiment.
        assert_eq!(scorer.compound("!!!"), 0.0);
    }

    #[test]
    fn test_bigram_entry() {
        let scorer = ValenceScorer::new();
        // 2.2 / sqrt(2.2^2 + 15)
        assert!(approx(scorer.compound("good job"), 0.4939));
    }

    #[test]
    fn test_score_is_bounded() {
        let scorer = ValenceScorer::new();
        let score = scorer.compound(
            "amazing awesome excellent fantastic wonderful perfect best superb brilliant!!!!",
        );
        assert!(score <= 1.0 && score > 0.9);
    }

    #[test]
    fn test_polarity_trait() {
        let scorer = ValenceScorer::new();
        assert_eq!(scorer.name(), "valence");
        assert!(scorer.polarity("love it").unwrap() > 0.5);
    }
}
