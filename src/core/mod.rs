//! Sentiment analysis engine.
//!
//! Leaf-first:
//! - `language`, `translate`, `sentiment`: text preparation and scoring
//! - `classifier`: text to [`Sentiment`](sentiment::Sentiment)
//! - `table`, `loader`, `discover`: getting a dataset into memory
//! - `processor`: per-question aggregation into a [`Report`](processor::Report)

pub mod classifier;
pub mod discover;
pub mod language;
pub mod loader;
pub mod processor;
pub mod sentiment;
pub mod table;
pub mod translate;

pub use classifier::{Classification, Classifier, Degradation, FatalError};
pub use loader::{LoadError, load_table};
pub use processor::{QuestionReport, Report, ScoredFeedback, process};
pub use sentiment::Sentiment;
