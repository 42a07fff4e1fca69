//! Per-question sentiment aggregation.

use rayon::prelude::*;
use serde::Serialize;

use crate::core::classifier::{Classification, Classifier, Degradation, FatalError};
use crate::core::sentiment::Sentiment;
use crate::core::table::Table;

/// Respondent metadata columns excluded from analysis by default.
pub const DEFAULT_IDENTITY_COLUMNS: &[&str] = &["Timestamp", "Name", "Roll No", "Class"];

/// One classified, non-blank response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFeedback {
    /// Cell text as it appeared in the dataset.
    pub feedback: String,
    pub sentiment: Sentiment,
    pub score: f64,
    #[serde(skip)]
    pub degradation: Option<Degradation>,
}

impl ScoredFeedback {
    pub fn new(feedback: impl Into<String>, classification: Classification) -> Self {
        Self {
            feedback: feedback.into(),
            sentiment: classification.sentiment,
            score: classification.score,
            degradation: classification.degradation,
        }
    }
}

/// Responses for one question column, in row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionReport {
    pub question: String,
    pub responses: Vec<ScoredFeedback>,
}

impl QuestionReport {
    /// Count per category, in label order. Categories with no responses
    /// are included with a zero count.
    pub fn distribution(&self) -> Vec<(Sentiment, usize)> {
        Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let count = self
                    .responses
                    .iter()
                    .filter(|r| r.sentiment == sentiment)
                    .count();
                (sentiment, count)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Row count of the source table.
    pub records: usize,
    pub questions: Vec<QuestionReport>,
}

impl Report {
    /// Every degradation recorded while classifying, with its question.
    pub fn degradations(&self) -> impl Iterator<Item = (&str, &ScoredFeedback, &Degradation)> {
        self.questions.iter().flat_map(|q| {
            q.responses.iter().filter_map(move |r| {
                r.degradation
                    .as_ref()
                    .map(|d| (q.question.as_str(), r, d))
            })
        })
    }
}

/// Columns left after dropping identity columns (exact, case-sensitive
/// match), with their index in the table.
pub fn question_columns<'a, S: AsRef<str>>(
    table: &'a Table,
    identity_columns: &'a [S],
) -> impl Iterator<Item = (usize, &'a str)> + 'a {
    table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !identity_columns.iter().any(|c| c.as_ref() == name.as_str()))
        .map(|(index, name)| (index, name.as_str()))
}

/// Classify every non-blank cell of every non-identity column.
///
/// Column and row order are preserved. The first fatal error aborts the run.
pub fn process<S: AsRef<str>>(
    table: &Table,
    classifier: &Classifier,
    identity_columns: &[S],
) -> Result<Report, FatalError> {
    let mut questions = Vec::new();

    for (index, name) in question_columns(table, identity_columns) {
        let cells: Vec<&str> = table
            .column(index)
            .flatten()
            .filter(|text| !text.trim().is_empty())
            .collect();

        let responses = cells
            .par_iter()
            .map(|&text| Ok(ScoredFeedback::new(text, classifier.classify_text(text)?)))
            .collect::<Result<Vec<_>, FatalError>>()?;

        questions.push(QuestionReport {
            question: name.to_string(),
            responses,
        });
    }

    Ok(Report {
        records: table.row_count(),
        questions,
    })
}
