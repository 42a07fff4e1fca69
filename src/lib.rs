//! Feelback - sentiment analysis for survey feedback
//!
//! Feelback is a CLI tool and library that classifies free-text survey responses
//! into five sentiment categories, question by question. Non-English responses
//! are translated to English before two rule-based polarity models score them.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, rendering, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Language detection, translation, scoring, dataset loading and aggregation

pub mod cli;
pub mod config;
pub mod core;
