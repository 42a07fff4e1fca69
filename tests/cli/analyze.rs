use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const FEEDBACK_CSV: &str = "\
Timestamp,Name,Comments
t1,Ana,yes
t2,Ben,
t3,Cy,no
";

#[test]
fn test_analyze_default_file() -> Result<()> {
    let test = CliTest::with_file("feedback.csv", FEEDBACK_CSV)?;

    let output = test.analyze_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\
Feedback Sentiment Analysis
==================================================
Found file at path: ./feedback.csv

Loading file from: ./feedback.csv
✓ Loaded file with 3 records and 3 columns.
Analyzing 1 questions...

Question: Comments

╒══════════╤═══════════╤═══════╕
│ Feedback │ Sentiment │ Score │
╞══════════╪═══════════╪═══════╡
│ yes      │ Positive  │  0.30 │
├──────────┼───────────┼───────┤
│ no       │ Negative  │ -0.30 │
╘══════════╧═══════════╧═══════╛
Distribution: 1 Negative, 1 Positive

==================================================
Analysis complete
"
    );
    assert_eq!(stderr(&output), "");

    Ok(())
}

#[test]
fn test_analyze_scores_free_text() -> Result<()> {
    let test = CliTest::with_file(
        "feedback.csv",
        "Timestamp,Comments,Suggestions\n\
         t1,Great job,\n\
         t2,The lectures were boring and the notes were terrible,\n",
    )?;

    let output = test.analyze_command().arg("--format").arg("json").output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output))?;
    let comments = &json["questions"][0];
    assert_eq!(comments["question"], "Comments");
    let great = &comments["responses"][0];
    assert_eq!(great["feedback"], "Great job");
    assert!(great["score"].as_f64().unwrap() >= 0.2);
    let boring = &comments["responses"][1];
    assert!(boring["score"].as_f64().unwrap() <= -0.2);
    assert!(
        boring["sentiment"] == "Negative" || boring["sentiment"] == "Very Negative",
        "{boring}"
    );

    let suggestions = &json["questions"][1];
    assert_eq!(suggestions["question"], "Suggestions");
    assert_eq!(suggestions["responses"], Value::Array(Vec::new()));

    Ok(())
}

#[test]
fn test_analyze_json_output() -> Result<()> {
    let test = CliTest::with_file("feedback.csv", FEEDBACK_CSV)?;

    let output = test
        .analyze_command()
        .args(["feedback.csv", "--format", "json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        json,
        serde_json::json!({
            "file": "feedback.csv",
            "records": 3,
            "questions": [{
                "question": "Comments",
                "responses": [
                    { "feedback": "yes", "sentiment": "Positive", "score": 0.3 },
                    { "feedback": "no", "sentiment": "Negative", "score": -0.3 },
                ],
            }],
        })
    );

    Ok(())
}

#[test]
fn test_analyze_empty_question() -> Result<()> {
    let test = CliTest::with_file("survey.tsv", "Name\tQ1\tQ2\nAna\tyes\t\n")?;

    let output = test.analyze_command().arg("survey.tsv").output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Analyzing 2 questions..."), "{out}");
    assert!(
        out.contains("Question: Q2\n\nNo feedback provided for this question.\n"),
        "{out}"
    );

    Ok(())
}

#[test]
fn test_analyze_discovers_file() -> Result<()> {
    let test = CliTest::with_file("march-survey.csv", FEEDBACK_CSV)?;
    test.write_file("notes.md", "not a dataset")?;

    let output = test.analyze_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("File not found at './feedback.csv'"), "{out}");
    assert!(
        out.contains("Found 1 potential feedback file(s):\n  1. march-survey.csv\n"),
        "{out}"
    );
    assert!(out.contains("Using file: ./march-survey.csv"), "{out}");
    assert!(out.contains("Analysis complete"), "{out}");

    Ok(())
}

#[test]
fn test_analyze_pick_with_closed_stdin_uses_first() -> Result<()> {
    let test = CliTest::with_file("data/only.csv", FEEDBACK_CSV)?;

    let output = test
        .analyze_command()
        .args(["--pick", "--dir", "data"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stderr(&output).contains("1. only.csv"));
    assert!(stdout(&output).contains("Loading file from: data/only.csv"));

    Ok(())
}

#[test]
fn test_analyze_zip_archive() -> Result<()> {
    let test = CliTest::new()?;
    test.write_zip(
        "export.zip",
        &[
            ("README.md", "Form export"),
            ("responses/feedback.csv", FEEDBACK_CSV),
        ],
    )?;

    let output = test
        .analyze_command()
        .args(["export.zip", "--extract-dir", "extracted", "--format", "json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(test.root().join("extracted/feedback.csv").is_file());

    let json: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(json["records"], 3);
    assert_eq!(json["questions"][0]["question"], "Comments");

    Ok(())
}

#[test]
fn test_analyze_respects_config() -> Result<()> {
    let test = CliTest::with_file(
        "responses.csv",
        "Timestamp,Email,Comments\nt1,a@b.c,yes\n",
    )?;
    test.write_file(
        ".feelbackrc.json",
        r#"{
          "identityColumns": ["Email"],
          "defaultInput": "responses.csv",
          "translation": { "enabled": false }
        }"#,
    )?;

    // No --no-translate: the config disables translation.
    let output = test
        .command()
        .args(["analyze", "--format", "json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let json: Value = serde_json::from_str(&stdout(&output))?;
    let questions: Vec<&str> = json["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["question"].as_str().unwrap())
        .collect();
    assert_eq!(questions, vec!["Timestamp", "Comments"]);

    Ok(())
}

#[test]
fn test_analyze_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.analyze_command().arg("missing.csv").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "error: file not found: missing.csv\n");

    Ok(())
}

#[test]
fn test_analyze_nothing_to_analyze() -> Result<()> {
    let test = CliTest::with_file("notes.md", "nothing here")?;

    let output = test.analyze_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "error: file not found: ./feedback.csv\n  hint: pass a file path, use --pick, or create feedback.csv\n"
    );

    Ok(())
}

#[test]
fn test_analyze_unsupported_format() -> Result<()> {
    let test = CliTest::with_file("feedback.pdf", "%PDF-1.4")?;

    let output = test.analyze_command().arg("feedback.pdf").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("error: unsupported file format '.pdf'"),
        "{}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_analyze_empty_dataset() -> Result<()> {
    let test = CliTest::with_file("feedback.csv", "Timestamp,Comments\n")?;

    let output = test.analyze_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "error: the file is empty or invalid\n");

    Ok(())
}

#[test]
fn test_analyze_archive_without_dataset() -> Result<()> {
    let test = CliTest::new()?;
    test.write_zip("photos.zip", &[("a.png", "")])?;

    let output = test.analyze_command().arg("photos.zip").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no spreadsheet or delimited file found in archive"));

    Ok(())
}

#[test]
fn test_analyze_invalid_config() -> Result<()> {
    let test = CliTest::with_file("feedback.csv", FEEDBACK_CSV)?;
    test.write_file(".feelbackrc.json", r#"{ "translation": { "timeoutSecs": 0 } }"#)?;

    let output = test.analyze_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).starts_with("Error: Invalid value for 'translation.timeoutSecs'"),
        "{}",
        stderr(&output)
    );

    Ok(())
}
