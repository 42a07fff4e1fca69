//! Translation to English.
//!
//! The classifier only depends on the [`Translator`] trait so tests and
//! offline runs can swap the web client for a stub.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::core::language::Language;

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation is disabled")]
    Disabled,
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected translation response: {0}")]
    Response(String),
}

/// Translate text from a source language into English.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: Language) -> Result<String, TranslateError>;
}

/// Translator used when translation is turned off: every call fails, so the
/// classifier falls back to the untranslated text.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTranslator;

impl Translator for DisabledTranslator {
    fn translate(&self, _text: &str, _source: Language) -> Result<String, TranslateError> {
        Err(TranslateError::Disabled)
    }
}

/// Client for the public Google Translate web endpoint.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, source: Language) -> Result<String, TranslateError> {
        if source.is_english() {
            return Ok(text.to_string());
        }

        let body: Value = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", "en"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        parse_response(&body)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The payload is a nested array: `[[["<translated>", "<source>", ...], ...], ...]`.
fn parse_response(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Response("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslateError::Response("empty translation".to_string()));
    }
    Ok(translated)
}
