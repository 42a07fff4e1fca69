//! Report formatting and printing utilities.
//!
//! Renders question reports as boxed tables or JSON and prints diagnostics.
//! Separate from core logic to allow feelback to be used as a library.

use std::io::Write;
use std::path::Path;

use colored::{ColoredString, Colorize};
use serde_json::{Value, json};
use unicode_width::UnicodeWidthStr;

use crate::core::classifier::Degradation;
use crate::core::loader::LoadError;
use crate::core::processor::{QuestionReport, Report, ScoredFeedback};
use crate::core::sentiment::Sentiment;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

const RULE_WIDTH: usize = 50;

const HEADERS: [&str; 3] = ["Feedback", "Sentiment", "Score"];

/// Box drawing characters: left, fill, junction, right.
const TOP: [&str; 4] = ["╒", "═", "╤", "╕"];
const HEADER_SEP: [&str; 4] = ["╞", "═", "╪", "╡"];
const ROW_SEP: [&str; 4] = ["├", "─", "┼", "┤"];
const BOTTOM: [&str; 4] = ["╘", "═", "╧", "╛"];
const VERTICAL: &str = "│";

pub fn print_banner<W: Write>(writer: &mut W) {
    let _ = writeln!(writer, "{}", "Feedback Sentiment Analysis".bold());
    let _ = writeln!(writer, "{}", "=".repeat(RULE_WIDTH));
}

pub fn print_footer<W: Write>(writer: &mut W) {
    let _ = writeln!(writer);
    let _ = writeln!(writer, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(writer, "{}", "Analysis complete".bold());
}

/// Print one question: heading, response table and distribution.
pub fn print_question<W: Write>(question: &QuestionReport, writer: &mut W) {
    let _ = writeln!(writer);
    let _ = writeln!(writer, "{} {}", "Question:".bold().cyan(), question.question.bold());
    let _ = writeln!(writer);

    if question.is_empty() {
        let _ = writeln!(writer, "No feedback provided for this question.");
        return;
    }

    print_table(&question.responses, writer);
    print_distribution(question, writer);
}

/// Print responses as a boxed `Feedback | Sentiment | Score` table.
///
/// Multi-line feedback spans several table lines; the label and score sit
/// on the first one.
pub fn print_table<W: Write>(responses: &[ScoredFeedback], writer: &mut W) {
    let rows: Vec<(Vec<String>, Sentiment, String)> = responses
        .iter()
        .map(|r| (display_lines(&r.feedback), r.sentiment, format_score(r.score)))
        .collect();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for (lines, sentiment, score) in &rows {
        for line in lines {
            widths[0] = widths[0].max(line.width());
        }
        widths[1] = widths[1].max(sentiment.label().width());
        widths[2] = widths[2].max(score.width());
    }

    let _ = writeln!(writer, "{}", border(TOP, &widths));
    let _ = writeln!(
        writer,
        "{v} {} {v} {} {v} {} {v}",
        pad_right(HEADERS[0], widths[0]),
        pad_right(HEADERS[1], widths[1]),
        pad_left(HEADERS[2], widths[2]),
        v = VERTICAL
    );
    let _ = writeln!(writer, "{}", border(HEADER_SEP, &widths));

    for (index, (lines, sentiment, score)) in rows.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(writer, "{}", border(ROW_SEP, &widths));
        }
        for (line_no, line) in lines.iter().enumerate() {
            let (label, score) = if line_no == 0 {
                (sentiment.label(), score.as_str())
            } else {
                ("", "")
            };
            let padding = widths[1] - label.width();
            let _ = writeln!(
                writer,
                "{v} {} {v} {}{} {v} {} {v}",
                pad_right(line, widths[0]),
                colorize(*sentiment, label),
                " ".repeat(padding),
                pad_left(score, widths[2]),
                v = VERTICAL
            );
        }
    }

    let _ = writeln!(writer, "{}", border(BOTTOM, &widths));
}

/// Print the non-zero category counts of a question, in label order.
pub fn print_distribution<W: Write>(question: &QuestionReport, writer: &mut W) {
    let parts: Vec<String> = question
        .distribution()
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(sentiment, count)| format!("{} {}", count, colorize(sentiment, sentiment.label())))
        .collect();
    let _ = writeln!(writer, "Distribution: {}", parts.join(", "));
}

/// Print a load failure and, when the file was looked up by convention,
/// a hint on how to point at one.
pub fn print_load_error<W: Write>(err: &LoadError, default_name: Option<&str>, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "error:".bold().red(), err);
    if let (LoadError::NotFound(_), Some(default_name)) = (err, default_name) {
        let _ = writeln!(
            writer,
            "  {} pass a file path, use {}, or create {}",
            "hint:".bold().cyan(),
            "--pick".cyan(),
            default_name
        );
    }
}

/// Print recovered per-response failures.
///
/// In verbose mode every degradation is listed. Otherwise only failed
/// translations are summarized, and only when translation was requested.
pub fn print_degradations<'a, W, I>(
    degradations: I,
    translation_enabled: bool,
    verbose: bool,
    writer: &mut W,
) where
    W: Write,
    I: IntoIterator<Item = (Option<&'a str>, &'a ScoredFeedback, &'a Degradation)>,
{
    let mut failed_translations = 0;

    for (question, response, degradation) in degradations {
        let translation_failed = matches!(degradation, Degradation::TranslationFailed { .. });
        if translation_failed {
            if !translation_enabled {
                continue;
            }
            failed_translations += 1;
        }
        if !verbose {
            continue;
        }

        let prefix = if translation_failed {
            "warning:".bold().yellow()
        } else {
            "note:".bold().cyan()
        };
        let location = match question {
            Some(question) => format!("[{}] ", question),
            None => String::new(),
        };
        let _ = writeln!(
            writer,
            "{} {}\"{}\": {}",
            prefix,
            location,
            response.feedback.trim(),
            degradation
        );
    }

    if failed_translations > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} response(s) could not be translated and were scored as written (use {} for details)",
            "warning:".bold().yellow(),
            failed_translations,
            "-v".cyan()
        );
    }
}

// ============================================================
// JSON
// ============================================================

pub fn report_json(file: &Path, report: &Report) -> Value {
    let questions: Vec<Value> = report
        .questions
        .iter()
        .map(|q| {
            json!({
                "question": q.question,
                "responses": responses_json(&q.responses),
            })
        })
        .collect();

    json!({
        "file": file.display().to_string(),
        "records": report.records,
        "questions": questions,
    })
}

pub fn responses_json(responses: &[ScoredFeedback]) -> Value {
    Value::Array(
        responses
            .iter()
            .map(|r| {
                json!({
                    "feedback": r.feedback,
                    "sentiment": r.sentiment.label(),
                    "score": round_score(r.score),
                })
            })
            .collect(),
    )
}

// ============================================================
// Internal Functions
// ============================================================

/// Round to 2 decimals, without a negative zero.
fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0 + 0.0
}

fn format_score(score: f64) -> String {
    format!("{:.2}", round_score(score))
}

fn display_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.replace('\t', " ").trim_end().to_string())
        .collect();
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

fn colorize(sentiment: Sentiment, text: &str) -> ColoredString {
    match sentiment {
        Sentiment::VeryPositive => text.green().bold(),
        Sentiment::Positive => text.green(),
        Sentiment::Neutral => text.normal(),
        Sentiment::Negative => text.red(),
        Sentiment::VeryNegative => text.red().bold(),
    }
}

fn border(chars: [&str; 4], widths: &[usize; 3]) -> String {
    let [left, fill, junction, right] = chars;
    let segments: Vec<String> = widths.iter().map(|w| fill.repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(junction), right)
}

fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn pad_left(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(padding), text)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn scored(feedback: &str, sentiment: Sentiment, score: f64) -> ScoredFeedback {
        ScoredFeedback {
            feedback: feedback.to_string(),
            sentiment,
            score,
            degradation: None,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let responses = vec![
            scored("Great job", Sentiment::Positive, 0.62485),
            scored("no", Sentiment::Negative, -0.3),
        ];
        let output = render(|out| print_table(&responses, out));
        assert_eq!(
            output,
            "\
╒═══════════╤═══════════╤═══════╕
│ Feedback  │ Sentiment │ Score │
╞═══════════╪═══════════╪═══════╡
│ Great job │ Positive  │  0.62 │
├───────────┼───────────┼───────┤
│ no        │ Negative  │ -0.30 │
╘═══════════╧═══════════╧═══════╛
"
        );
    }

    #[test]
    fn test_table_with_wide_and_multiline_feedback() {
        let responses = vec![
            scored("很好", Sentiment::VeryPositive, 0.9),
            scored("good\nbut long", Sentiment::Neutral, 0.001),
        ];
        let output = render(|out| print_table(&responses, out));
        assert_eq!(
            output,
            "\
╒══════════╤═══════════════╤═══════╕
│ Feedback │ Sentiment     │ Score │
╞══════════╪═══════════════╪═══════╡
│ 很好     │ Very Positive │  0.90 │
├──────────┼───────────────┼───────┤
│ good     │ Neutral       │  0.00 │
│ but long │               │       │
╘══════════╧═══════════════╧═══════╛
"
        );
    }

    #[test]
    fn test_empty_question() {
        let question = QuestionReport {
            question: "Suggestions".to_string(),
            responses: Vec::new(),
        };
        let output = render(|out| print_question(&question, out));
        assert_eq!(
            output,
            "\nQuestion: Suggestions\n\nNo feedback provided for this question.\n"
        );
    }

    #[test]
    fn test_distribution_line() {
        let question = QuestionReport {
            question: "Q".to_string(),
            responses: vec![
                scored("a", Sentiment::Positive, 0.3),
                scored("b", Sentiment::Negative, -0.3),
                scored("c", Sentiment::Positive, 0.5),
            ],
        };
        let output = render(|out| print_distribution(&question, out));
        assert_eq!(output, "Distribution: 1 Negative, 2 Positive\n");
    }

    #[test]
    fn test_load_error_hint() {
        let err = LoadError::NotFound(PathBuf::from("feedback.csv"));
        let output = render(|out| print_load_error(&err, Some("feedback.csv"), out));
        assert_eq!(
            output,
            "error: file not found: feedback.csv\n  hint: pass a file path, use --pick, or create feedback.csv\n"
        );

        let output = render(|out| print_load_error(&LoadError::EmptyDataset, None, out));
        assert_eq!(output, "error: the file is empty or invalid\n");
    }

    #[test]
    fn test_degradation_summary() {
        let response = scored("la clase", Sentiment::Neutral, 0.0);
        let failed = Degradation::TranslationFailed {
            language: "es".to_string(),
            reason: "timed out".to_string(),
        };
        let inconclusive = Degradation::DetectionInconclusive;
        let items = [
            (Some("Q1"), &response, &failed),
            (Some("Q1"), &response, &inconclusive),
        ];

        let output = render(|out| print_degradations(items, true, false, out));
        assert_eq!(
            output,
            "warning: 1 response(s) could not be translated and were scored as written (use -v for details)\n"
        );

        let output = render(|out| print_degradations(items, false, false, out));
        assert_eq!(output, "");

        let output = render(|out| print_degradations(items, true, true, out));
        assert_eq!(
            output,
            "warning: [Q1] \"la clase\": translation from 'es' failed (timed out), scored as written\n\
             note: [Q1] \"la clase\": language not detected, scored as written\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let report = Report {
            records: 3,
            questions: vec![QuestionReport {
                question: "Comments".to_string(),
                responses: vec![scored("Great job", Sentiment::Positive, 0.62485)],
            }],
        };
        let value = report_json(Path::new("feedback.csv"), &report);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"file":"feedback.csv","records":3,"questions":[{"question":"Comments","responses":[{"feedback":"Great job","sentiment":"Positive","score":0.62}]}]}"#
        );
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.004), "0.00");
        assert_eq!(format_score(-0.004), "0.00");
        assert_eq!(format_score(-0.7), "-0.70");
        assert_eq!(format_score(1.0), "1.00");
    }
}
