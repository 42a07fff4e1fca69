//! Deterministic language detection.
//!
//! Two passes over the text:
//! 1. Script: letters outside the Latin script identify their language
//!    directly (Devanagari, Cyrillic, Greek, Arabic, Hangul, Kana, Han).
//! 2. Vocabulary: Latin-script words are matched against per-language
//!    function-word lists, with language-specific diacritics as extra votes.
//!
//! A language wins only with enough votes and a clear lead over the runner-up;
//! anything else is inconclusive. No randomness is involved, so detection of
//! the same text is always stable.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Serialize;

use crate::core::sentiment::{Token, tokenize};

/// Minimum votes a Latin-script language needs to be chosen.
const MIN_VOTES: usize = 1;
/// Minimum lead of the winner over the runner-up.
const MIN_LEAD: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Dutch,
    Hindi,
    Russian,
    Greek,
    Arabic,
    Chinese,
    Japanese,
    Korean,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Dutch => "nl",
            Language::Hindi => "hi",
            Language::Russian => "ru",
            Language::Greek => "el",
            Language::Arabic => "ar",
            Language::Chinese => "zh-CN",
            Language::Japanese => "ja",
            Language::Korean => "ko",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("text contains no letters")]
    NoLetters,
    #[error("no language stands out")]
    Inconclusive,
}

// ============================================================
// Vocabulary Profiles
// ============================================================

#[rustfmt::skip]
const ENGLISH: &[&str] = &[
    "the", "and", "is", "was", "were", "are", "be", "been", "it", "this", "that",
    "to", "of", "in", "for", "with", "i", "you", "we", "they", "he", "she", "my",
    "our", "very", "but", "not", "have", "has", "had", "would", "could", "should",
    "will", "can", "more", "some", "there", "what", "which", "all", "an",
];

#[rustfmt::skip]
const SPANISH: &[&str] = &[
    "el", "los", "las", "es", "muy", "y", "que", "del", "por", "para", "con",
    "una", "un", "pero", "fue", "son", "está", "esta", "como", "más", "mas",
    "mi", "nos", "sus", "su", "también", "bien", "bueno", "buena", "gracias",
    "clase", "clases", "profesor", "todo", "nada", "hay", "lo",
];

#[rustfmt::skip]
const FRENCH: &[&str] = &[
    "le", "les", "des", "est", "et", "très", "une", "du", "pour", "avec", "mais",
    "pas", "je", "nous", "vous", "il", "elle", "ce", "cette", "était", "sont",
    "au", "aux", "qui", "que", "bien", "bon", "bonne", "merci", "cours", "tout",
    "trop", "plus", "sur", "dans",
];

#[rustfmt::skip]
const GERMAN: &[&str] = &[
    "der", "die", "das", "und", "ist", "sehr", "nicht", "ein", "eine", "mit",
    "war", "sind", "ich", "wir", "sie", "es", "zu", "auf", "für", "aber", "auch",
    "gut", "schlecht", "danke", "kurs", "den", "dem", "des", "wie", "noch", "mehr",
];

#[rustfmt::skip]
const ITALIAN: &[&str] = &[
    "il", "lo", "gli", "è", "e", "molto", "che", "di", "per", "con", "ma", "non",
    "sono", "una", "un", "del", "della", "nel", "era", "anche", "bene", "buono",
    "buona", "grazie", "corso", "tutto", "più", "questo", "questa",
];

#[rustfmt::skip]
const PORTUGUESE: &[&str] = &[
    "o", "os", "as", "é", "e", "muito", "que", "de", "do", "da", "dos", "das",
    "para", "com", "mas", "não", "nao", "uma", "um", "foi", "são", "está",
    "bem", "bom", "boa", "obrigado", "obrigada", "curso", "tudo", "mais", "isso",
];

#[rustfmt::skip]
const DUTCH: &[&str] = &[
    "de", "het", "een", "en", "is", "zeer", "erg", "niet", "met", "voor", "maar",
    "was", "zijn", "ik", "wij", "we", "ze", "ook", "goed", "slecht", "bedankt",
    "cursus", "van", "dat", "die", "op", "te", "heel",
];

struct Profile {
    language: Language,
    words: HashSet<&'static str>,
    /// Letters characteristic of the language.
    marks: &'static str,
}

static PROFILES: LazyLock<Vec<Profile>> = LazyLock::new(|| {
    let profile = |language, words: &[&'static str], marks| Profile {
        language,
        words: words.iter().copied().collect(),
        marks,
    };
    vec![
        profile(Language::English, ENGLISH, ""),
        profile(Language::Spanish, SPANISH, "ñ¿¡"),
        profile(Language::French, FRENCH, "çœèêëîïûù"),
        profile(Language::German, GERMAN, "ßäöü"),
        profile(Language::Italian, ITALIAN, "ìò"),
        profile(Language::Portuguese, PORTUGUESE, "ãõ"),
        profile(Language::Dutch, DUTCH, "ĳ"),
    ]
});

// ============================================================
// Detector
// ============================================================

/// Best-effort language detector.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, text: &str) -> Result<Language, DetectionError> {
        let mut latin = 0usize;
        let mut other = 0usize;
        let mut scripts = ScriptCounts::default();
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            if scripts.record(c) {
                other += 1;
            } else {
                latin += 1;
            }
        }

        if latin + other == 0 {
            return Err(DetectionError::NoLetters);
        }
        if other > latin {
            return scripts.dominant().ok_or(DetectionError::Inconclusive);
        }

        detect_latin(text)
    }
}

fn detect_latin(text: &str) -> Result<Language, DetectionError> {
    let words: Vec<String> = tokenize(text)
        .into_iter()
        .filter_map(|t| match t {
            Token::Word(w) => Some(w),
            _ => None,
        })
        .collect();

    let mut votes: Vec<(Language, usize)> = PROFILES
        .iter()
        .map(|profile| {
            let word_votes = words
                .iter()
                .filter(|w| profile.words.contains(w.as_str()))
                .count();
            let mark_votes = text
                .chars()
                .flat_map(char::to_lowercase)
                .filter(|c| profile.marks.contains(*c))
                .count();
            (profile.language, word_votes + mark_votes)
        })
        .collect();

    // Stable sort keeps profile order for ties.
    votes.sort_by(|a, b| b.1.cmp(&a.1));

    let (best, best_votes) = votes[0];
    let runner_up = votes.get(1).map(|(_, v)| *v).unwrap_or(0);
    if best_votes >= MIN_VOTES && best_votes >= runner_up + MIN_LEAD {
        Ok(best)
    } else {
        Err(DetectionError::Inconclusive)
    }
}

#[derive(Debug, Default)]
struct ScriptCounts {
    devanagari: usize,
    cyrillic: usize,
    greek: usize,
    arabic: usize,
    hangul: usize,
    kana: usize,
    han: usize,
}

impl ScriptCounts {
    /// Count a non-Latin letter. Returns false for Latin (or unknown) letters.
    fn record(&mut self, c: char) -> bool {
        let slot = match c as u32 {
            0x0900..=0x097F => &mut self.devanagari,
            0x0400..=0x04FF => &mut self.cyrillic,
            0x0370..=0x03FF => &mut self.greek,
            0x0600..=0x06FF | 0x0750..=0x077F => &mut self.arabic,
            0xAC00..=0xD7AF | 0x1100..=0x11FF => &mut self.hangul,
            0x3040..=0x30FF => &mut self.kana,
            0x4E00..=0x9FFF | 0x3400..=0x4DBF => &mut self.han,
            _ => return false,
        };
        *slot += 1;
        true
    }

    fn dominant(&self) -> Option<Language> {
        // Japanese mixes Han with Kana; any Kana decides it.
        if self.kana > 0 {
            return Some(Language::Japanese);
        }
        [
            (Language::Hindi, self.devanagari),
            (Language::Russian, self.cyrillic),
            (Language::Greek, self.greek),
            (Language::Arabic, self.arabic),
            (Language::Korean, self.hangul),
            (Language::Chinese, self.han),
        ]
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .max_by_key(|(_, n)| *n)
        .map(|(language, _)| language)
    }
}
